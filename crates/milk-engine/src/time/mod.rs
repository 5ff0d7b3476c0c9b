//! Frame timing and periodic timers driven by the host tick loop.

mod frame_clock;
mod interval;

pub use frame_clock::{FrameClock, FrameTime};
pub use interval::IntervalTimer;
