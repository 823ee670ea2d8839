//! Motion engine error types

use epoch_core::{ElementId, SurfaceError};
use thiserror::Error;

/// Reasons a motion request was not scheduled
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The target element is not on the surface
    #[error("motion target not found: {0}")]
    MissingElement(ElementId),

    /// The request names no properties
    #[error("motion for {0} has no property goals")]
    EmptyTarget(ElementId),

    /// Duration or delay is negative or not finite
    #[error("invalid timing for {element}: duration {duration_ms}ms, delay {delay_ms}ms")]
    InvalidTiming {
        element: ElementId,
        duration_ms: f32,
        delay_ms: f32,
    },

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl MotionError {
    /// Whether the error only means a collaborator is absent
    pub fn is_missing(&self) -> bool {
        match self {
            MotionError::MissingElement(_) => true,
            MotionError::Surface(err) => err.is_missing(),
            _ => false,
        }
    }
}
