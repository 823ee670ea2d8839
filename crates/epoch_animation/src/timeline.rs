//! Timeline orchestration for multiple motions
//!
//! A [`Timeline`] places motion targets at offsets from a shared start and
//! issues them together. Members of one timeline do not supersede each other
//! when issued; a later member only takes a property over from an earlier one
//! once its own start time arrives.

use crate::error::MotionError;
use crate::motion::{Cue, MotionTarget};
use crate::scheduler::{MotionHandle, MotionScheduler};
use epoch_core::RenderSurface;

/// Configuration for staggered starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerConfig {
    /// Delay between consecutive items (ms)
    pub delay_ms: f32,
}

impl StaggerConfig {
    pub fn new(delay_ms: f32) -> Self {
        Self { delay_ms }
    }

    /// Start delay for the item at `index`
    pub fn delay_for_index(&self, index: usize) -> f32 {
        self.delay_ms * index as f32
    }
}

/// A group of motions on a shared clock
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<(f32, MotionTarget)>,
    /// End of the last entry added with [`then`](Self::then) or [`at`](Self::at)
    cursor_ms: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target starting `offset_ms` after the timeline starts
    pub fn at(mut self, offset_ms: f32, target: MotionTarget) -> Self {
        let end = offset_ms + target.total_ms().unwrap_or(target.delay_ms + target.duration_ms);
        self.cursor_ms = self.cursor_ms.max(end);
        self.entries.push((offset_ms, target));
        self
    }

    /// Add a target starting when everything added so far has finished
    pub fn then(self, target: MotionTarget) -> Self {
        let offset = self.cursor_ms;
        self.at(offset, target)
    }

    /// Add targets at `offset_ms`, each delayed by its stagger slot
    pub fn stagger(
        mut self,
        offset_ms: f32,
        targets: impl IntoIterator<Item = MotionTarget>,
        config: StaggerConfig,
    ) -> Self {
        for (i, target) in targets.into_iter().enumerate() {
            self = self.at(offset_ms + config.delay_for_index(i), target);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time from start until the last finite entry ends
    pub fn total_ms(&self) -> f32 {
        self.cursor_ms
    }

    /// Issue every entry. `cue` is delivered once the whole timeline has
    /// finished; entries whose element is missing are skipped.
    pub fn play(
        self,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
        cue: Option<Cue>,
    ) -> Result<TimelineHandle, MotionError> {
        let group = engine.new_group();
        let total = self.total_ms();
        let mut motions = Vec::with_capacity(self.entries.len());

        for (offset, target) in self.entries {
            let delay = target.delay_ms;
            match engine.animate_in_group(target.delay(offset + delay), group, surface) {
                Ok(handle) => motions.push(handle),
                Err(err) if err.is_missing() => {
                    tracing::debug!(%err, "timeline entry skipped");
                }
                Err(err) => return Err(err),
            }
        }

        let end = cue.map(|cue| engine.after(total, cue));
        Ok(TimelineHandle { motions, end })
    }
}

/// Handle to a played timeline
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineHandle {
    pub motions: Vec<MotionHandle>,
    /// Timer carrying the completion cue
    pub end: Option<MotionHandle>,
}

impl TimelineHandle {
    /// Cancel remaining members and the completion cue
    pub fn cancel(&self, engine: &mut MotionScheduler) {
        for handle in self.motions.iter().chain(self.end.iter()) {
            engine.cancel(*handle);
        }
    }

    pub fn is_active(&self, engine: &MotionScheduler) -> bool {
        self.motions
            .iter()
            .chain(self.end.iter())
            .any(|h| engine.is_active(*h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use epoch_core::{ElementId, Property, Rect, SceneSurface};

    fn scene(ids: &[&str]) -> SceneSurface {
        let mut scene = SceneSurface::new();
        for id in ids {
            scene.insert(ElementId::new(id), Rect::new(0.0, 0.0, 50.0, 50.0));
        }
        scene
    }

    #[test]
    fn test_stagger_delays() {
        let config = StaggerConfig::new(80.0);
        assert_eq!(config.delay_for_index(0), 0.0);
        assert_eq!(config.delay_for_index(4), 320.0);
    }

    #[test]
    fn test_sequenced_squash_truncates_earlier_step() {
        let mut scene = scene(&["jelly"]);
        let mut engine = MotionScheduler::new();
        let jelly = ElementId::new("jelly");

        let handle = Timeline::new()
            .then(
                MotionTarget::new("jelly", 100.0)
                    .to(Property::ScaleX, 1.25)
                    .to(Property::ScaleY, 0.75),
            )
            .then(
                MotionTarget::new("jelly", 100.0)
                    .to(Property::ScaleX, 0.75)
                    .to(Property::ScaleY, 1.25),
            )
            .then(
                MotionTarget::new("jelly", 800.0)
                    .to(Property::ScaleX, 1.0)
                    .to(Property::ScaleY, 1.0)
                    .ease(Easing::elastic(1.0, 0.3)),
            )
            .play(&mut engine, &mut scene, Some(Cue(4)))
            .unwrap();
        assert_eq!(handle.motions.len(), 3);

        let mut cues = Vec::new();
        let mut elapsed = 0.0f32;
        while elapsed < 1000.0 {
            for completion in engine.tick(10.0, &mut scene) {
                cues.extend(completion.cue);
            }
            elapsed += 10.0;
            if (elapsed - 100.0).abs() < f32::EPSILON {
                assert_eq!(scene.property(&jelly, Property::ScaleX), Some(1.25));
            }
            if (elapsed - 200.0).abs() < f32::EPSILON {
                assert_eq!(scene.property(&jelly, Property::ScaleY), Some(1.25));
            }
        }
        assert_eq!(cues, vec![Cue(4)]);
        assert_eq!(scene.property(&jelly, Property::ScaleX), Some(1.0));
        assert!(!handle.is_active(&engine));
    }

    #[test]
    fn test_missing_members_are_skipped() {
        let mut scene = scene(&["a"]);
        let mut engine = MotionScheduler::new();
        let handle = Timeline::new()
            .stagger(
                0.0,
                ["a", "b"].map(|id| MotionTarget::new(id, 100.0).to(Property::Opacity, 1.0)),
                StaggerConfig::new(50.0),
            )
            .play(&mut engine, &mut scene, None)
            .unwrap();
        assert_eq!(handle.motions.len(), 1);
        assert_eq!(handle.end, None);
    }

    #[test]
    fn test_cancel_suppresses_cue() {
        let mut scene = scene(&["overlay"]);
        let mut engine = MotionScheduler::new();
        let handle = Timeline::new()
            .at(0.0, MotionTarget::new("overlay", 300.0).to(Property::Opacity, 1.0))
            .play(&mut engine, &mut scene, Some(Cue(1)))
            .unwrap();
        engine.tick(100.0, &mut scene);
        handle.cancel(&mut engine);
        assert!(engine.tick(400.0, &mut scene).is_empty());
        assert!(!engine.has_active_animations());
    }
}
