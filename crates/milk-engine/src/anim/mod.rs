//! Property animation engine.
//!
//! - [`Easing`]: the thirteen easing curves
//! - [`Tween`] / [`Animation`]: keyframed tweens and parallel/sequential groups
//! - [`AnimTarget`]: the property bag an animation writes into
//! - [`AnimationEngine`]: named slots per target with replace semantics
//! - [`presets`]: fade, slide, bounce, pulse, shake, scale, move

mod animation;
mod easing;
mod engine;
mod target;
mod tween;
mod value;

pub mod presets;

pub use animation::{Animation, Group};
pub use easing::Easing;
pub use engine::{AnimEvent, AnimHandle, AnimationEngine, Completed, FinishedCallback, SharedEngine};
pub use target::{AnimTarget, TargetId, WeakTarget, props};
pub use tween::{Keyframe, Tween};
pub use value::AnimValue;
