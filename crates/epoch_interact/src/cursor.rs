//! Cursor overlay
//!
//! Two elements track the pointer: the dot is written directly on every move,
//! the outline is retargeted with a fixed-duration trail so fast movement
//! never builds a backlog.

use crate::issue;
use epoch_animation::{Easing, MotionScheduler, MotionTarget};
use epoch_core::{ElementId, Point, Property, RenderSurface};

#[derive(Clone, Debug)]
pub struct CursorOverlay {
    dot: ElementId,
    outline: ElementId,
    trail_ms: f32,
    last: Option<Point>,
}

impl CursorOverlay {
    pub fn new(dot: impl Into<ElementId>, outline: impl Into<ElementId>, trail_ms: f32) -> Self {
        Self {
            dot: dot.into(),
            outline: outline.into(),
            trail_ms: trail_ms.max(0.0),
            last: None,
        }
    }

    /// Last pointer position seen
    pub fn position(&self) -> Option<Point> {
        self.last
    }

    pub fn on_move(
        &mut self,
        pointer: Point,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) {
        self.last = Some(pointer);

        let snapped = engine
            .set(&self.dot, Property::Left, pointer.x, surface)
            .and_then(|_| engine.set(&self.dot, Property::Top, pointer.y, surface));
        if let Err(err) = snapped {
            tracing::debug!(%err, "cursor dot skipped");
        }

        issue(
            engine,
            MotionTarget::new(self.outline.clone(), self.trail_ms)
                .to(Property::Left, pointer.x)
                .to(Property::Top, pointer.y)
                .ease(Easing::Linear),
            surface,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epoch_core::{Rect, SceneSurface};

    fn scene() -> SceneSurface {
        let mut scene = SceneSurface::new();
        scene.insert(ElementId::new("cursor-dot"), Rect::new(0.0, 0.0, 8.0, 8.0));
        scene.insert(ElementId::new("cursor-outline"), Rect::new(0.0, 0.0, 40.0, 40.0));
        scene
    }

    #[test]
    fn test_dot_snaps_and_outline_trails() {
        let mut scene = scene();
        let mut engine = MotionScheduler::new();
        let mut cursor = CursorOverlay::new("cursor-dot", "cursor-outline", 500.0);
        let dot = ElementId::new("cursor-dot");
        let outline = ElementId::new("cursor-outline");

        cursor.on_move(Point::new(100.0, 50.0), &mut engine, &mut scene);
        assert_eq!(scene.property(&dot, Property::Left), Some(100.0));
        assert_eq!(scene.property(&dot, Property::Top), Some(50.0));

        engine.tick(250.0, &mut scene);
        assert_eq!(scene.property(&outline, Property::Left), Some(50.0));
    }

    #[test]
    fn test_rapid_moves_retarget_outline() {
        let mut scene = scene();
        let mut engine = MotionScheduler::new();
        let mut cursor = CursorOverlay::new("cursor-dot", "cursor-outline", 500.0);
        let outline = ElementId::new("cursor-outline");

        for i in 0..20 {
            cursor.on_move(Point::new(i as f32 * 10.0, 0.0), &mut engine, &mut scene);
            engine.tick(16.0, &mut scene);
        }
        let flights = engine.in_flight(&outline, Property::Left);
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].1, 190.0);
        assert_eq!(engine.active_count(), 1);

        engine.tick(500.0, &mut scene);
        assert_eq!(scene.property(&outline, Property::Left), Some(190.0));
        assert_eq!(cursor.position(), Some(Point::new(190.0, 0.0)));
    }

    #[test]
    fn test_missing_overlay_is_ignored() {
        let mut scene = SceneSurface::new();
        let mut engine = MotionScheduler::new();
        let mut cursor = CursorOverlay::new("cursor-dot", "cursor-outline", 500.0);
        cursor.on_move(Point::new(1.0, 1.0), &mut engine, &mut scene);
        assert!(!engine.has_active_animations());
    }
}
