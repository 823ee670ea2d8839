//! Motion scheduler
//!
//! Manages all active motions and advances them on a shared frame clock.
//!
//! Every (element, property) pair has at most one live owner. Issuing a new
//! target for a pair removes that pair from whatever motion currently holds
//! it, pending or running, so the last request always wins and two motions
//! never compete for one property. The replacement starts from the value the
//! property has when its delay elapses.

use crate::error::MotionError;
use crate::motion::{Cue, MotionTarget, Repeat};
use crate::easing::Easing;
use epoch_core::{ElementId, Property, RenderSurface};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct MotionId;
}

/// Handle to a scheduled motion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionHandle(MotionId);

/// Motions issued together (one timeline) share a group and never supersede
/// each other at issue time.
pub(crate) type GroupId = u64;

type Key = (ElementId, Property);

/// A motion that finished during a tick
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub handle: MotionHandle,
    pub element: Option<ElementId>,
    pub cue: Option<Cue>,
}

#[derive(Clone, Debug)]
struct Track {
    property: Property,
    from: f32,
    to: f32,
    explicit_from: Option<f32>,
}

impl Track {
    /// Exact at both endpoints, so settled values match their goals bit for bit
    fn sample(&self, progress: f32) -> f32 {
        self.from * (1.0 - progress) + self.to * progress
    }
}

#[derive(Clone, Debug)]
struct Motion {
    /// `None` for timers
    element: Option<ElementId>,
    tracks: SmallVec<[Track; 4]>,
    duration_ms: f32,
    delay_remaining_ms: f32,
    elapsed_ms: f32,
    started: bool,
    easing: Easing,
    repeat: Repeat,
    cue: Option<Cue>,
    group: GroupId,
    seq: u64,
}

impl Motion {
    /// Eased progress for the current elapsed time and whether the motion is done
    fn advance(&mut self) -> (f32, bool) {
        if self.duration_ms <= 0.0 {
            return (self.final_progress(), true);
        }
        match self.repeat.passes() {
            None => {
                if self.elapsed_ms >= self.duration_ms {
                    self.elapsed_ms %= self.duration_ms;
                }
                (self.easing.apply(self.elapsed_ms / self.duration_ms), false)
            }
            Some(passes) => {
                if self.elapsed_ms >= self.duration_ms * passes as f32 {
                    return (self.final_progress(), true);
                }
                let pass = (self.elapsed_ms / self.duration_ms).floor() as u32;
                let local = (self.elapsed_ms - pass as f32 * self.duration_ms) / self.duration_ms;
                let forward = !matches!(self.repeat, Repeat::Yoyo(_)) || pass % 2 == 0;
                let progress = if forward {
                    self.easing.apply(local)
                } else {
                    self.easing.apply(1.0 - local)
                };
                (progress, false)
            }
        }
    }

    fn final_progress(&self) -> f32 {
        match self.repeat {
            Repeat::Yoyo(n) if n % 2 == 1 => 0.0,
            _ => 1.0,
        }
    }
}

/// The motion engine: schedules, retargets and ticks all motions
pub struct MotionScheduler {
    motions: SlotMap<MotionId, Motion>,
    /// Every pending or running motion holding each (element, property)
    claims: FxHashMap<Key, SmallVec<[MotionId; 2]>>,
    /// Last value the engine wrote for each (element, property)
    values: FxHashMap<Key, f32>,
    next_group: GroupId,
    next_seq: u64,
}

impl MotionScheduler {
    pub fn new() -> Self {
        Self {
            motions: SlotMap::with_key(),
            claims: FxHashMap::default(),
            values: FxHashMap::default(),
            next_group: 0,
            next_seq: 0,
        }
    }

    /// Schedule a motion, superseding overlapping in-flight motions.
    ///
    /// Explicit `from` values are written to the surface immediately.
    pub fn animate(
        &mut self,
        target: MotionTarget,
        surface: &mut dyn RenderSurface,
    ) -> Result<MotionHandle, MotionError> {
        let group = self.new_group();
        self.animate_in_group(target, group, surface)
    }

    pub(crate) fn new_group(&mut self) -> GroupId {
        self.next_group += 1;
        self.next_group
    }

    pub(crate) fn animate_in_group(
        &mut self,
        target: MotionTarget,
        group: GroupId,
        surface: &mut dyn RenderSurface,
    ) -> Result<MotionHandle, MotionError> {
        if target.goals.is_empty() {
            return Err(MotionError::EmptyTarget(target.element));
        }
        let timing_ok = target.duration_ms.is_finite()
            && target.duration_ms >= 0.0
            && target.delay_ms.is_finite()
            && target.delay_ms >= 0.0;
        if !timing_ok {
            return Err(MotionError::InvalidTiming {
                element: target.element,
                duration_ms: target.duration_ms,
                delay_ms: target.delay_ms,
            });
        }
        if !surface.exists(&target.element) {
            return Err(MotionError::MissingElement(target.element));
        }

        for goal in &target.goals {
            let key = (target.element.clone(), goal.property);
            self.release(&key, |_, motion| motion.group != group);
            if let Some(from) = goal.from {
                surface.set_property(&target.element, goal.property, from)?;
                self.values.insert(key, from);
            }
        }

        let tracks = target
            .goals
            .iter()
            .map(|g| Track {
                property: g.property,
                from: g.from.unwrap_or_else(|| g.property.rest_value()),
                to: g.to,
                explicit_from: g.from,
            })
            .collect();
        let id = self.insert(Motion {
            element: Some(target.element.clone()),
            tracks,
            duration_ms: target.duration_ms,
            delay_remaining_ms: target.delay_ms,
            elapsed_ms: 0.0,
            started: false,
            easing: target.easing,
            repeat: target.repeat,
            cue: target.cue,
            group,
            seq: 0,
        });
        for property in target.properties() {
            self.claims
                .entry((target.element.clone(), property))
                .or_default()
                .push(id);
        }

        tracing::trace!(element = %target.element, duration_ms = target.duration_ms, "motion scheduled");
        Ok(MotionHandle(id))
    }

    /// Deliver `cue` after `delay_ms` without touching any property
    pub fn after(&mut self, delay_ms: f32, cue: Cue) -> MotionHandle {
        let group = self.new_group();
        MotionHandle(self.insert(Motion {
            element: None,
            tracks: SmallVec::new(),
            duration_ms: 0.0,
            delay_remaining_ms: delay_ms.max(0.0),
            elapsed_ms: 0.0,
            started: false,
            easing: Easing::Linear,
            repeat: Repeat::Once,
            cue: Some(cue),
            group,
            seq: 0,
        }))
    }

    /// Write a value immediately, cancelling any in-flight motion on the pair
    pub fn set(
        &mut self,
        element: &ElementId,
        property: Property,
        value: f32,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), MotionError> {
        if !surface.exists(element) {
            return Err(MotionError::MissingElement(element.clone()));
        }
        let key = (element.clone(), property);
        self.release(&key, |_, _| true);
        surface.set_property(element, property, value)?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Stop a motion, leaving its properties at their current values.
    ///
    /// Returns `false` if the motion already finished or was superseded.
    pub fn cancel(&mut self, handle: MotionHandle) -> bool {
        self.remove_motion(handle.0).is_some()
    }

    /// Advance all motions by `dt_ms` and write their values to the surface.
    ///
    /// Completions are returned after every value for the frame is written.
    pub fn tick(&mut self, dt_ms: f32, surface: &mut dyn RenderSurface) -> Vec<Completion> {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        let mut order: Vec<(u64, MotionId)> =
            self.motions.iter().map(|(id, m)| (m.seq, id)).collect();
        order.sort_unstable_by_key(|(seq, _)| *seq);

        let mut completions = Vec::new();
        for (_, id) in order {
            let Some(motion) = self.motions.get_mut(id) else {
                continue;
            };
            let mut remaining = dt;
            if !motion.started {
                if motion.delay_remaining_ms > remaining {
                    motion.delay_remaining_ms -= remaining;
                    continue;
                }
                remaining -= motion.delay_remaining_ms;
                motion.delay_remaining_ms = 0.0;
                self.start(id, surface);
            }

            let Some(motion) = self.motions.get_mut(id) else {
                continue;
            };
            motion.elapsed_ms += remaining;
            let (progress, done) = motion.advance();
            let element = motion.element.clone();
            let writes: SmallVec<[(Property, f32); 4]> = motion
                .tracks
                .iter()
                .map(|t| (t.property, t.sample(progress)))
                .collect();

            if let Some(element) = element.as_ref() {
                let mut vanished = false;
                for (property, value) in writes {
                    if let Err(err) = surface.set_property(element, property, value) {
                        tracing::debug!(%element, %err, "motion target unavailable, dropping motion");
                        vanished = true;
                        break;
                    }
                    self.values.insert((element.clone(), property), value);
                }
                if vanished {
                    self.remove_motion(id);
                    continue;
                }
            }

            if done {
                if let Some(motion) = self.remove_motion(id) {
                    completions.push(Completion {
                        handle: MotionHandle(id),
                        element,
                        cue: motion.cue,
                    });
                }
            }
        }
        completions
    }

    /// Whether the motion is still pending or running
    pub fn is_active(&self, handle: MotionHandle) -> bool {
        self.motions.contains_key(handle.0)
    }

    /// Last value the engine wrote for the pair
    pub fn value(&self, element: &ElementId, property: Property) -> Option<f32> {
        self.values.get(&(element.clone(), property)).copied()
    }

    /// Motions currently holding the pair, with their goal values
    pub fn in_flight(&self, element: &ElementId, property: Property) -> Vec<(MotionHandle, f32)> {
        let Some(ids) = self.claims.get(&(element.clone(), property)) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| {
                let motion = self.motions.get(*id)?;
                let track = motion.tracks.iter().find(|t| t.property == property)?;
                Some((MotionHandle(*id), track.to))
            })
            .collect()
    }

    /// Whether any motion (timers included) is pending or running
    pub fn has_active_animations(&self) -> bool {
        !self.motions.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.motions.len()
    }

    fn insert(&mut self, mut motion: Motion) -> MotionId {
        self.next_seq += 1;
        motion.seq = self.next_seq;
        self.motions.insert(motion)
    }

    fn start(&mut self, id: MotionId, surface: &dyn RenderSurface) {
        let Some(motion) = self.motions.get(id) else {
            return;
        };
        let group = motion.group;
        let element = motion.element.clone();
        let properties: SmallVec<[Property; 4]> =
            motion.tracks.iter().map(|t| t.property).collect();

        if let Some(element) = element {
            for property in properties {
                let key = (element.clone(), property);
                // An earlier member of the same timeline still running on this
                // pair is truncated now.
                self.release(&key, |other, m| other != id && m.started && m.group == group);
                let current = self.current_value(&key, surface);
                if let Some(track) = self
                    .motions
                    .get_mut(id)
                    .and_then(|m| m.tracks.iter_mut().find(|t| t.property == property))
                {
                    track.from = track.explicit_from.unwrap_or(current);
                }
            }
        }
        if let Some(motion) = self.motions.get_mut(id) {
            motion.started = true;
        }
    }

    fn current_value(&self, key: &Key, surface: &dyn RenderSurface) -> f32 {
        self.values
            .get(key)
            .copied()
            .or_else(|| surface.property(&key.0, key.1))
            .unwrap_or_else(|| key.1.rest_value())
    }

    /// Remove `key` from every claiming motion matching `should_release`.
    /// Motions left without tracks are dropped without completing.
    fn release<F>(&mut self, key: &Key, mut should_release: F)
    where
        F: FnMut(MotionId, &Motion) -> bool,
    {
        let Some(ids) = self.claims.get_mut(key) else {
            return;
        };
        let motions = &self.motions;
        let mut released: SmallVec<[MotionId; 2]> = SmallVec::new();
        ids.retain(|id| match motions.get(*id) {
            Some(motion) if should_release(*id, motion) => {
                released.push(*id);
                false
            }
            Some(_) => true,
            None => false,
        });
        if ids.is_empty() {
            self.claims.remove(key);
        }

        for id in released {
            let emptied = match self.motions.get_mut(id) {
                Some(motion) => {
                    motion.tracks.retain(|t| t.property != key.1);
                    motion.tracks.is_empty()
                }
                None => false,
            };
            if emptied {
                self.motions.remove(id);
                tracing::trace!(element = %key.0, property = %key.1, "motion superseded");
            }
        }
    }

    fn remove_motion(&mut self, id: MotionId) -> Option<Motion> {
        let motion = self.motions.remove(id)?;
        if let Some(element) = motion.element.as_ref() {
            for track in &motion.tracks {
                let key = (element.clone(), track.property);
                if let Some(ids) = self.claims.get_mut(&key) {
                    ids.retain(|other| *other != id);
                    if ids.is_empty() {
                        self.claims.remove(&key);
                    }
                }
            }
        }
        Some(motion)
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epoch_core::{Rect, SceneSurface};

    const FRAME: f32 = 16.0;

    fn scene(ids: &[&str]) -> SceneSurface {
        let mut scene = SceneSurface::new();
        for id in ids {
            scene.insert(ElementId::new(id), Rect::new(0.0, 0.0, 100.0, 100.0));
        }
        scene
    }

    fn run(engine: &mut MotionScheduler, scene: &mut SceneSurface, ms: f32) -> Vec<Completion> {
        let mut completions = Vec::new();
        let mut t = 0.0;
        while t < ms {
            completions.extend(engine.tick(FRAME, scene));
            t += FRAME;
        }
        completions
    }

    #[test]
    fn test_tween_reaches_goal_and_completes_once() {
        let mut scene = scene(&["card"]);
        let mut engine = MotionScheduler::new();
        let card = ElementId::new("card");

        engine
            .animate(
                MotionTarget::new("card", 300.0)
                    .to(Property::TranslateX, 100.0)
                    .ease(Easing::EaseOutCubic)
                    .on_complete(Cue(7)),
                &mut scene,
            )
            .unwrap();

        let mid = run(&mut engine, &mut scene, 160.0);
        assert!(mid.is_empty());
        let halfway = scene.property_or_rest(&card, Property::TranslateX);
        assert!(halfway > 50.0 && halfway < 100.0);

        let done = run(&mut engine, &mut scene, 200.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].cue, Some(Cue(7)));
        assert_eq!(scene.property(&card, Property::TranslateX), Some(100.0));
        assert!(!engine.has_active_animations());
    }

    #[test]
    fn test_retarget_replaces_in_flight_motion() {
        let mut scene = scene(&["btn"]);
        let mut engine = MotionScheduler::new();
        let btn = ElementId::new("btn");

        let first = engine
            .animate(
                MotionTarget::new("btn", 200.0)
                    .to(Property::TranslateX, 80.0)
                    .on_complete(Cue(1)),
                &mut scene,
            )
            .unwrap();
        run(&mut engine, &mut scene, 96.0);
        let interrupted_at = scene.property_or_rest(&btn, Property::TranslateX);
        assert!(interrupted_at > 0.0);

        let second = engine
            .animate(
                MotionTarget::new("btn", 200.0).to(Property::TranslateX, -40.0),
                &mut scene,
            )
            .unwrap();

        assert!(!engine.is_active(first));
        let flights = engine.in_flight(&btn, Property::TranslateX);
        assert_eq!(flights, vec![(second, -40.0)]);

        // The replacement starts from the interrupted value: no jump on the next frame
        engine.tick(1.0, &mut scene);
        let after = scene.property_or_rest(&btn, Property::TranslateX);
        assert!((after - interrupted_at).abs() < 2.0);

        let completions = run(&mut engine, &mut scene, 240.0);
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].cue, None);
        assert_eq!(scene.property(&btn, Property::TranslateX), Some(-40.0));
    }

    #[test]
    fn test_partial_overlap_keeps_other_properties() {
        let mut scene = scene(&["card"]);
        let mut engine = MotionScheduler::new();
        let card = ElementId::new("card");

        let both = engine
            .animate(
                MotionTarget::new("card", 100.0)
                    .to(Property::TranslateX, 10.0)
                    .to(Property::Scale, 2.0),
                &mut scene,
            )
            .unwrap();
        engine
            .animate(
                MotionTarget::new("card", 100.0).to(Property::Scale, 1.5),
                &mut scene,
            )
            .unwrap();

        assert!(engine.is_active(both));
        run(&mut engine, &mut scene, 120.0);
        assert_eq!(scene.property(&card, Property::TranslateX), Some(10.0));
        assert_eq!(scene.property(&card, Property::Scale), Some(1.5));
    }

    #[test]
    fn test_cancel_leaves_interpolated_value() {
        let mut scene = scene(&["knob"]);
        let mut engine = MotionScheduler::new();
        let knob = ElementId::new("knob");

        let handle = engine
            .animate(MotionTarget::new("knob", 400.0).to(Property::Rotate, 90.0), &mut scene)
            .unwrap();
        run(&mut engine, &mut scene, 160.0);
        let frozen = scene.property_or_rest(&knob, Property::Rotate);

        assert!(engine.cancel(handle));
        assert!(!engine.cancel(handle));
        run(&mut engine, &mut scene, 400.0);
        assert_eq!(scene.property_or_rest(&knob, Property::Rotate), frozen);
        assert!(frozen > 0.0 && frozen < 90.0);
    }

    #[test]
    fn test_missing_element_is_reported() {
        let mut scene = scene(&[]);
        let mut engine = MotionScheduler::new();
        let err = engine
            .animate(MotionTarget::new("ghost", 100.0).to(Property::Opacity, 0.0), &mut scene)
            .unwrap_err();
        assert!(err.is_missing());
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn test_yoyo_returns_to_start() {
        let mut scene = scene(&["badge"]);
        let mut engine = MotionScheduler::new();
        let badge = ElementId::new("badge");

        engine
            .animate(
                MotionTarget::new("badge", 200.0)
                    .from_to(Property::Scale, 1.0, 1.2)
                    .yoyo(1),
                &mut scene,
            )
            .unwrap();
        run(&mut engine, &mut scene, 192.0);
        assert!(scene.property_or_rest(&badge, Property::Scale) > 1.15);
        run(&mut engine, &mut scene, 240.0);
        assert_eq!(scene.property(&badge, Property::Scale), Some(1.0));
    }

    #[test]
    fn test_forever_loops_within_range() {
        let mut scene = scene(&["track"]);
        let mut engine = MotionScheduler::new();
        let track = ElementId::new("track");

        engine
            .animate(
                MotionTarget::new("track", 1000.0)
                    .to(Property::TranslateX, -300.0)
                    .repeat_forever(),
                &mut scene,
            )
            .unwrap();

        for _ in 0..1000 {
            let completions = engine.tick(FRAME, &mut scene);
            assert!(completions.is_empty());
            let x = scene.property_or_rest(&track, Property::TranslateX);
            assert!((-300.0..=0.0).contains(&x));
        }
        assert!(engine.has_active_animations());
    }

    #[test]
    fn test_delay_with_explicit_from_applies_immediately() {
        let mut scene = scene(&["slot"]);
        let mut engine = MotionScheduler::new();
        let slot = ElementId::new("slot");

        engine
            .animate(
                MotionTarget::new("slot", 100.0)
                    .from_to(Property::Opacity, 0.0, 1.0)
                    .delay(200.0),
                &mut scene,
            )
            .unwrap();
        assert_eq!(scene.property(&slot, Property::Opacity), Some(0.0));
        run(&mut engine, &mut scene, 192.0);
        assert_eq!(scene.property(&slot, Property::Opacity), Some(0.0));
        run(&mut engine, &mut scene, 128.0);
        assert_eq!(scene.property(&slot, Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_set_cancels_in_flight_motion() {
        let mut scene = scene(&["fill"]);
        let mut engine = MotionScheduler::new();
        let fill = ElementId::new("fill");

        engine
            .animate(
                MotionTarget::new("fill", 500.0).to(Property::WidthPercent, 100.0),
                &mut scene,
            )
            .unwrap();
        engine
            .set(&fill, Property::WidthPercent, 25.0, &mut scene)
            .unwrap();
        run(&mut engine, &mut scene, 600.0);
        assert_eq!(scene.property(&fill, Property::WidthPercent), Some(25.0));
        assert_eq!(engine.value(&fill, Property::WidthPercent), Some(25.0));
    }

    #[test]
    fn test_timer_delivers_cue() {
        let mut scene = scene(&[]);
        let mut engine = MotionScheduler::new();
        engine.after(100.0, Cue(3));
        assert!(run(&mut engine, &mut scene, 96.0).is_empty());
        let done = engine.tick(FRAME, &mut scene);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].cue, Some(Cue(3)));
        assert_eq!(done[0].element, None);
    }

    #[test]
    fn test_elastic_return_overshoots_rest_then_settles() {
        let mut scene = scene(&["mag"]);
        let mut engine = MotionScheduler::new();
        let mag = ElementId::new("mag");

        engine.set(&mag, Property::TranslateX, 60.0, &mut scene).unwrap();
        engine
            .animate(
                MotionTarget::new("mag", 600.0)
                    .to(Property::TranslateX, 0.0)
                    .ease(Easing::elastic(1.0, 0.4)),
                &mut scene,
            )
            .unwrap();

        let mut min_seen = f32::MAX;
        for _ in 0..38 {
            engine.tick(FRAME, &mut scene);
            min_seen = min_seen.min(scene.property_or_rest(&mag, Property::TranslateX));
        }
        assert!(min_seen < 0.0, "should overshoot past rest");
        assert_eq!(scene.property(&mag, Property::TranslateX), Some(0.0));
    }

    #[test]
    fn test_removed_element_drops_motion() {
        let mut scene = scene(&["frame"]);
        let mut engine = MotionScheduler::new();
        engine
            .animate(
                MotionTarget::new("frame", 200.0)
                    .to(Property::RotateX, 10.0)
                    .on_complete(Cue(9)),
                &mut scene,
            )
            .unwrap();
        scene.remove(&ElementId::new("frame"));
        let completions = run(&mut engine, &mut scene, 300.0);
        assert!(completions.is_empty());
        assert!(!engine.has_active_animations());
    }
}
