//! Click carousel
//!
//! A slide counter that wraps within `1..=count` and shows the current slide
//! label on its display element.

use epoch_core::{ElementId, RenderSurface};

#[derive(Clone, Debug)]
pub struct ClickCarousel {
    display: ElementId,
    count: usize,
    current: usize,
}

impl ClickCarousel {
    pub fn new(display: impl Into<ElementId>, count: usize) -> Self {
        Self {
            display: display.into(),
            count: count.max(1),
            current: 1,
        }
    }

    /// Current slide, 1-based
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn label(&self) -> String {
        format!("IMG_{:02}", self.current)
    }

    /// Step by `direction` slides, wrapping at both ends
    pub fn step(&mut self, direction: isize, surface: &mut dyn RenderSurface) -> usize {
        let count = self.count as isize;
        let zero_based = (self.current as isize - 1 + direction).rem_euclid(count);
        self.current = zero_based as usize + 1;
        if let Err(err) = surface.set_text(&self.display, &self.label()) {
            tracing::debug!(%err, "carousel display skipped");
        }
        self.current
    }

    pub fn next(&mut self, surface: &mut dyn RenderSurface) -> usize {
        self.step(1, surface)
    }

    pub fn prev(&mut self, surface: &mut dyn RenderSurface) -> usize {
        self.step(-1, surface)
    }
}
