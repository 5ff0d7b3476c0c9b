//! Built-in widget variants.

pub mod button;
pub mod calendar;
pub mod clock;
pub mod container;
pub mod gauge;
pub mod graph;
pub mod picture;
pub mod progress;
pub mod smooth;
pub mod spacer;
pub mod text;

pub use button::Button;
pub use calendar::Calendar;
pub use clock::{Clock, ClockStyle};
pub use container::{Container, Layout};
pub use gauge::{Gauge, GaugeStyle};
pub use graph::{Graph, GraphType};
pub use picture::{FillMode, Image};
pub use progress::ProgressBar;
pub use smooth::SmoothedValue;
pub use spacer::Spacer;
pub use text::{Text, TextEffect};
