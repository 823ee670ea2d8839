//! Behavior construction errors

use thiserror::Error;

/// Invalid behavior configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteractError {
    #[error("invalid drag bounds [{min}, {max}]")]
    InvalidBounds { min: f32, max: f32 },

    #[error("follow factor {0} must be in (0, 1]")]
    InvalidFactor(f32),

    #[error("invalid {name}: {value}")]
    InvalidTuning { name: &'static str, value: f32 },
}

/// Result type for behavior construction
pub type Result<T> = std::result::Result<T, InteractError>;
