//! Sliding indicator
//!
//! An indicator element (blob, underline) that moves its `left` and `width`
//! to match the selected item, measured relative to the item container.

use crate::issue;
use epoch_animation::{Easing, MotionHandle, MotionScheduler, MotionTarget};
use epoch_core::{ElementId, Property, RenderSurface};

#[derive(Clone, Debug)]
pub struct SlidingIndicator {
    container: ElementId,
    indicator: ElementId,
    duration_ms: f32,
    easing: Easing,
    selected: Option<ElementId>,
}

impl SlidingIndicator {
    pub fn new(
        container: impl Into<ElementId>,
        indicator: impl Into<ElementId>,
        duration_ms: f32,
        easing: Easing,
    ) -> Self {
        Self {
            container: container.into(),
            indicator: indicator.into(),
            duration_ms,
            easing,
            selected: None,
        }
    }

    /// Organic blob: elastic(1, 0.7) over 500 ms
    pub fn liquid(container: impl Into<ElementId>, indicator: impl Into<ElementId>) -> Self {
        Self::new(container, indicator, 500.0, Easing::elastic(1.0, 0.7))
    }

    /// Crawling underline: expo out over 400 ms
    pub fn worm(container: impl Into<ElementId>, indicator: impl Into<ElementId>) -> Self {
        Self::new(container, indicator, 400.0, Easing::EaseOutExpo)
    }

    /// Contained blob: quad out over 400 ms
    pub fn island(container: impl Into<ElementId>, indicator: impl Into<ElementId>) -> Self {
        Self::new(container, indicator, 400.0, Easing::EaseOutQuad)
    }

    pub fn container(&self) -> &ElementId {
        &self.container
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Move the indicator under `item`
    pub fn select(
        &mut self,
        item: &ElementId,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> Option<MotionHandle> {
        let (Some(container), Some(bounds)) = (surface.bounds(&self.container), surface.bounds(item))
        else {
            tracing::debug!(%item, "indicator item not laid out");
            return None;
        };
        let relative = bounds.relative_to(&container);
        self.selected = Some(item.clone());
        issue(
            engine,
            MotionTarget::new(self.indicator.clone(), self.duration_ms)
                .to(Property::Left, relative.x())
                .to(Property::Width, relative.width())
                .ease(self.easing),
            surface,
        )
    }

    /// Move the indicator under the container's `index`-th child
    pub fn select_index(
        &mut self,
        index: usize,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> Option<MotionHandle> {
        let item = surface.children(&self.container).into_iter().nth(index)?;
        self.select(&item.id, engine, surface)
    }
}
