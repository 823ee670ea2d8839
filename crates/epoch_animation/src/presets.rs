//! Motion presets for common feedback patterns
//!
//! Pre-built targets and timelines shared by widgets and demo behaviors.

use crate::easing::Easing;
use crate::motion::MotionTarget;
use crate::timeline::Timeline;
use epoch_core::{ElementId, Property};

/// Pre-built motion presets
pub struct MotionPreset;

impl MotionPreset {
    // ========================================================================
    // Fades
    // ========================================================================

    pub fn fade_to(element: impl Into<ElementId>, opacity: f32, duration_ms: f32) -> MotionTarget {
        MotionTarget::new(element, duration_ms).to(Property::Opacity, opacity)
    }

    // ========================================================================
    // Return to rest
    // ========================================================================

    /// Send `properties` back to their rest values
    pub fn rest(
        element: impl Into<ElementId>,
        properties: &[Property],
        duration_ms: f32,
        easing: Easing,
    ) -> MotionTarget {
        properties
            .iter()
            .fold(MotionTarget::new(element, duration_ms), |target, p| {
                target.to(*p, p.rest_value())
            })
            .ease(easing)
    }

    // ========================================================================
    // Press feedback
    // ========================================================================

    /// Shrink slightly and spring back
    pub fn press(element: impl Into<ElementId>) -> MotionTarget {
        MotionTarget::new(element, 100.0)
            .from_to(Property::Scale, 1.0, 0.95)
            .yoyo(1)
    }

    /// Widen and flatten, then return
    pub fn stretch_press(element: impl Into<ElementId>) -> MotionTarget {
        MotionTarget::new(element, 150.0)
            .from_to(Property::ScaleX, 1.0, 1.1)
            .from_to(Property::ScaleY, 1.0, 0.9)
            .ease(Easing::EaseOutQuad)
            .yoyo(1)
    }

    /// Flash an inner glow
    pub fn glow_pulse(element: impl Into<ElementId>) -> MotionTarget {
        MotionTarget::new(element, 100.0)
            .from_to(Property::Glow, 0.0, 1.0)
            .yoyo(1)
    }

    pub fn badge_pulse(element: impl Into<ElementId>) -> MotionTarget {
        MotionTarget::new(element, 200.0)
            .from_to(Property::Scale, 1.0, 1.2)
            .ease(Easing::EaseOutQuad)
            .yoyo(1)
    }

    /// Nudge horizontally by `dx` and back
    pub fn nudge(element: impl Into<ElementId>, dx: f32) -> MotionTarget {
        MotionTarget::new(element, 100.0)
            .from_to(Property::TranslateX, 0.0, dx)
            .yoyo(1)
    }

    /// Pop in from a smaller scale with an overshoot
    pub fn pop_in(element: impl Into<ElementId>, from_scale: f32, duration_ms: f32, easing: Easing) -> MotionTarget {
        MotionTarget::new(element, duration_ms)
            .from_to(Property::Scale, from_scale, 1.0)
            .ease(easing)
    }

    // ========================================================================
    // Jelly
    // ========================================================================

    /// Squash, stretch, then wobble back to rest
    pub fn jelly(element: impl Into<ElementId>, squash: (f32, f32), stretch: (f32, f32)) -> Timeline {
        let element = element.into();
        Timeline::new()
            .then(
                MotionTarget::new(element.clone(), 100.0)
                    .to(Property::ScaleX, squash.0)
                    .to(Property::ScaleY, squash.1),
            )
            .then(
                MotionTarget::new(element.clone(), 100.0)
                    .to(Property::ScaleX, stretch.0)
                    .to(Property::ScaleY, stretch.1),
            )
            .then(
                MotionTarget::new(element, 800.0)
                    .to(Property::ScaleX, 1.0)
                    .to(Property::ScaleY, 1.0)
                    .ease(Easing::elastic(1.0, 0.3)),
            )
    }

    pub fn jelly_press(element: impl Into<ElementId>) -> Timeline {
        Self::jelly(element, (1.25, 0.75), (0.75, 1.25))
    }

    /// Softer squash for the glazed button
    pub fn glazed_press(element: impl Into<ElementId>) -> Timeline {
        Self::jelly(element, (1.2, 0.8), (0.9, 1.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::MotionScheduler;
    use epoch_core::{Rect, RenderSurface, SceneSurface};

    #[test]
    fn test_rest_targets_rest_values() {
        let target = MotionPreset::rest(
            "card",
            &[Property::TranslateX, Property::Scale],
            800.0,
            Easing::elastic(1.0, 0.3),
        );
        assert_eq!(target.goal(Property::TranslateX), Some(0.0));
        assert_eq!(target.goal(Property::Scale), Some(1.0));
    }

    #[test]
    fn test_jelly_runs_one_second() {
        assert_eq!(MotionPreset::jelly_press("jelly").total_ms(), 1000.0);
        assert_eq!(MotionPreset::glazed_press("glazed").len(), 3);
    }

    /// Fire `make` twice, 64 ms apart, and let everything settle
    fn fire_twice(make: impl Fn() -> MotionTarget) -> SceneSurface {
        let mut scene = SceneSurface::new();
        scene.insert(ElementId::new("btn"), Rect::new(0.0, 0.0, 120.0, 40.0));
        let mut engine = MotionScheduler::new();

        engine.animate(make(), &mut scene).unwrap();
        for _ in 0..4 {
            engine.tick(16.0, &mut scene);
        }
        engine.animate(make(), &mut scene).unwrap();
        for _ in 0..60 {
            engine.tick(16.0, &mut scene);
        }
        assert!(!engine.has_active_animations());
        scene
    }

    #[test]
    fn test_pulses_fired_mid_flight_end_at_rest() {
        let btn = ElementId::new("btn");

        let scene = fire_twice(|| MotionPreset::press("btn"));
        assert_eq!(scene.property(&btn, Property::Scale), Some(1.0));

        let scene = fire_twice(|| MotionPreset::glow_pulse("btn"));
        assert_eq!(scene.property(&btn, Property::Glow), Some(0.0));

        let scene = fire_twice(|| MotionPreset::stretch_press("btn"));
        assert_eq!(scene.property(&btn, Property::ScaleX), Some(1.0));
        assert_eq!(scene.property(&btn, Property::ScaleY), Some(1.0));

        let scene = fire_twice(|| MotionPreset::nudge("btn", 5.0));
        assert_eq!(scene.property(&btn, Property::TranslateX), Some(0.0));

        let scene = fire_twice(|| MotionPreset::badge_pulse("btn"));
        assert_eq!(scene.property(&btn, Property::Scale), Some(1.0));
    }

    #[test]
    fn test_press_returns_to_start() {
        let press = MotionPreset::press("btn");
        assert_eq!(press.total_ms(), Some(200.0));
    }
}
