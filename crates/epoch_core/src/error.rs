//! Rendering surface error types

use crate::element::ElementId;
use thiserror::Error;

/// Errors reported by a [`RenderSurface`](crate::RenderSurface).
///
/// Every variant belongs to the "missing optional collaborator" class:
/// callers log them and skip the affected effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The element is not (or no longer) present on the surface
    #[error("element not found: {0}")]
    MissingElement(ElementId),

    /// The parent for a new child is not present
    #[error("parent element not found: {0}")]
    MissingParent(ElementId),

    /// An element with this id already exists
    #[error("element already exists: {0}")]
    DuplicateElement(ElementId),

    /// The value is not finite
    #[error("non-finite value {value} for {element}.{property}")]
    NonFinite {
        element: ElementId,
        property: &'static str,
        value: f32,
    },
}

impl SurfaceError {
    /// Whether this error only means the target is absent
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            SurfaceError::MissingElement(_) | SurfaceError::MissingParent(_)
        )
    }
}

/// Result type for surface operations
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;
