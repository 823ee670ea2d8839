//! Showcase error types

use epoch_animation::MotionError;
use epoch_interact::InteractError;
use thiserror::Error;

/// Showcase construction and configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShowcaseError {
    #[error("era table is empty")]
    EmptyEraTable,

    #[error("loop track needs at least 3 copies, got {0}")]
    TooFewCopies(usize),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("scene is missing required element {0}")]
    MissingScene(String),

    #[error(transparent)]
    Interact(#[from] InteractError),

    #[error(transparent)]
    Motion(#[from] MotionError),
}

/// Result type for showcase operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;
