//! Epoch Animation System
//!
//! Eased tweens, elastic return-to-rest curves, and timeline orchestration
//! on a shared frame clock.
//!
//! # Features
//!
//! - **Easing**: monotonic tween curves plus overshooting back/elastic curves
//! - **Motion targets**: "animate property P of element T toward a goal over
//!   duration D with easing E"
//! - **Retargeting**: issuing a new target for an (element, property) pair
//!   replaces the in-flight animation, starting from its current value
//! - **Timelines**: sequenced and staggered motions with a single completion cue

pub mod easing;
pub mod error;
pub mod motion;
pub mod presets;
pub mod scheduler;
pub mod timeline;

pub use easing::Easing;
pub use error::MotionError;
pub use motion::{Cue, MotionTarget, PropertyGoal, Repeat};
pub use presets::MotionPreset;
pub use scheduler::{Completion, MotionHandle, MotionScheduler};
pub use timeline::{StaggerConfig, Timeline, TimelineHandle};
