//! Epoch Interaction Behaviors
//!
//! Components that turn raw pointer and drag input into motion targets:
//!
//! - [`PointerFollow`]: damped, parallax and tilt follow with elastic
//!   return-to-rest on exit
//! - [`Draggable`]: bounded linear or rotational dragging with velocity
//!   tracking, release inertia and velocity-driven secondary effects
//! - [`CursorOverlay`]: snapping dot plus a trailing outline
//! - [`SlidingIndicator`]: an indicator that swims to the selected item
//! - [`ClickCarousel`]: a wrapping slide index
//!
//! Behaviors never fail an interaction because an element is missing; the
//! affected motion is skipped and logged at debug level.

pub mod carousel;
pub mod cursor;
pub mod drag;
pub mod error;
pub mod indicator;
pub mod pointer;

pub use carousel::ClickCarousel;
pub use cursor::CursorOverlay;
pub use drag::{
    DragAxis, DragInput, DragPhase, DragSession, DragSignal, DragTuning, Draggable, SqueezeSignal,
    VelocityTracker,
};
pub use error::{InteractError, Result};
pub use indicator::SlidingIndicator;
pub use pointer::{Anchor, FollowLayer, FollowMode, PointerFollow};

use epoch_animation::{MotionHandle, MotionScheduler, MotionTarget};
use epoch_core::RenderSurface;

/// Issue a motion, treating a missing element as a no-op
pub fn issue(
    engine: &mut MotionScheduler,
    target: MotionTarget,
    surface: &mut dyn RenderSurface,
) -> Option<MotionHandle> {
    match engine.animate(target, surface) {
        Ok(handle) => Some(handle),
        Err(err) if err.is_missing() => {
            tracing::debug!(%err, "motion skipped");
            None
        }
        Err(err) => {
            tracing::warn!(%err, "motion rejected");
            None
        }
    }
}
