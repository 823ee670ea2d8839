//! Rendering surface abstraction
//!
//! The core never talks to a concrete renderer. It depends only on this
//! capability set: addressable elements, numeric property writes, a few
//! content/style writes, and layout queries.

use crate::element::{ElementId, Property};
use crate::error::SurfaceResult;
use crate::geometry::Rect;

/// Description of a child element created from markup
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub id: ElementId,
    pub tag: String,
    pub text: String,
}

/// A surface that accepts transform/style commands against addressable elements.
///
/// Writes to elements that do not exist return
/// [`SurfaceError::MissingElement`](crate::SurfaceError::MissingElement);
/// queries return `None` or an empty list.
pub trait RenderSurface {
    /// Whether the element is currently present
    fn exists(&self, element: &ElementId) -> bool;

    /// Layout rectangle of the element in viewport coordinates
    fn bounds(&self, element: &ElementId) -> Option<Rect>;

    /// Last value written for a numeric property
    fn property(&self, element: &ElementId, property: Property) -> Option<f32>;

    /// Write a numeric property
    fn set_property(
        &mut self,
        element: &ElementId,
        property: Property,
        value: f32,
    ) -> SurfaceResult<()>;

    /// Write a free-form style declaration (colors, borders, shadows)
    fn set_style(&mut self, element: &ElementId, name: &str, value: &str) -> SurfaceResult<()>;

    /// Replace the element's text content
    fn set_text(&mut self, element: &ElementId, text: &str) -> SurfaceResult<()>;

    /// Replace the element's children with the given markup fragment
    fn set_markup(&mut self, element: &ElementId, markup: &str) -> SurfaceResult<()>;

    /// Replace the element's class list
    fn set_class(&mut self, element: &ElementId, class: &str) -> SurfaceResult<()>;

    /// Enable or disable pointer interception
    fn set_pointer_events(&mut self, element: &ElementId, enabled: bool) -> SurfaceResult<()>;

    /// Append a new child element with text content
    fn append_child(
        &mut self,
        parent: &ElementId,
        child: ElementId,
        text: &str,
    ) -> SurfaceResult<()>;

    /// Direct children in document order
    fn children(&self, element: &ElementId) -> Vec<NodeInfo>;
}
