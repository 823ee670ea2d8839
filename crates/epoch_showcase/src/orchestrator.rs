//! Showcase orchestration
//!
//! [`ShowcaseOrchestrator`] owns the era table, the looping timeline track
//! and the single modal session. Opening an era populates the modal from its
//! record, plays the entrance timeline, and binds the era's demos only once
//! the staggered reveal has finished. Closing reverses the entrance and
//! always converges to [`ModalPhase::Closed`], even mid-entrance.
//!
//! Sequencing is driven by completion cues: the orchestrator plays a
//! timeline with a cue, and the runtime hands the cue back through
//! [`ShowcaseOrchestrator::on_cue`] once the engine reports it.

use crate::config::{ModalConfig, ShowcaseConfig};
use crate::demos::DemoPanel;
use crate::era::{DemoSlot, EraRecord, EraStyle};
use crate::error::{Result, ShowcaseError};
use crate::modal::{ModalPhase, ModalSession};
use crate::scene::ids;
use crate::track::LoopTrack;
use epoch_animation::{
    Cue, Easing, MotionHandle, MotionPreset, MotionScheduler, MotionTarget, StaggerConfig,
    Timeline, TimelineHandle,
};
use epoch_core::events::event_types;
use epoch_core::{ElementId, Event, EventData, KeyCode, Property, RenderSurface};
use epoch_interact::{FollowLayer, PointerFollow};

/// Completion cues used by the modal sequence
pub mod cues {
    use epoch_animation::Cue;

    /// Staggered slot reveal finished
    pub const MODAL_REVEALED: Cue = Cue(100);
    /// Overlay fade-out finished
    pub const MODAL_CLOSED: Cue = Cue(101);
}

/// Hybrid surface tilt return
const TILT_RETURN_MS: f32 = 500.0;

pub struct ShowcaseOrchestrator {
    eras: Vec<EraRecord>,
    track: LoopTrack,
    session: ModalSession,
    timing: ModalConfig,
    scroll_duration_ms: f32,
    scroll: Option<MotionHandle>,
    open_timeline: Option<TimelineHandle>,
    close_timeline: Option<TimelineHandle>,
    demos: DemoPanel,
    surface_tilt: Option<PointerFollow>,
}

impl ShowcaseOrchestrator {
    pub fn new(eras: Vec<EraRecord>, config: &ShowcaseConfig) -> Result<Self> {
        let track = LoopTrack::new(eras.len(), config.timeline.copies)?;
        Ok(Self {
            eras,
            track,
            session: ModalSession::new(),
            timing: config.modal.clone(),
            scroll_duration_ms: config.timeline.scroll_duration_ms,
            scroll: None,
            open_timeline: None,
            close_timeline: None,
            demos: DemoPanel::new(),
            surface_tilt: None,
        })
    }

    pub fn eras(&self) -> &[EraRecord] {
        &self.eras
    }

    pub fn track(&self) -> &LoopTrack {
        &self.track
    }

    pub fn phase(&self) -> ModalPhase {
        self.session.phase()
    }

    pub fn open_era_index(&self) -> Option<usize> {
        self.session.open_era_index()
    }

    pub fn open_era(&self) -> Option<&EraRecord> {
        self.session.open_era_index().and_then(|i| self.eras.get(i))
    }

    pub fn demos(&self) -> &DemoPanel {
        &self.demos
    }

    pub fn has_surface_tilt(&self) -> bool {
        self.surface_tilt.is_some()
    }

    /// Handle of the endless track scroll, once mounted
    pub fn scroll_handle(&self) -> Option<MotionHandle> {
        self.scroll
    }

    /// Fill the timeline track, start its scroll and hide the modal
    pub fn mount(&mut self, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) -> Result<()> {
        let track_id = ElementId::new(ids::TIMELINE_TRACK);
        let overlay = ElementId::new(ids::MODAL_OVERLAY);
        let content = ElementId::new(ids::MODAL_CONTENT);
        for id in [&track_id, &overlay, &content] {
            if !surface.exists(id) {
                return Err(ShowcaseError::MissingScene(id.to_string()));
            }
        }

        self.track
            .populate(&self.eras, &track_id, surface)
            .map_err(|err| ShowcaseError::MissingScene(err.to_string()))?;
        let width = surface.bounds(&track_id).map_or(0.0, |b| b.width());
        self.scroll = Some(engine.animate(
            self.track.scroll_target(track_id, width, self.scroll_duration_ms),
            surface,
        )?);

        engine.set(&overlay, Property::Opacity, 0.0, surface)?;
        engine.set(&content, Property::Opacity, 0.0, surface)?;
        engine.set(&content, Property::TranslateY, self.timing.closed_offset_y, surface)?;
        surface
            .set_pointer_events(&overlay, false)
            .map_err(|err| ShowcaseError::MissingScene(err.to_string()))?;

        tracing::info!(cards = self.track.len(), copies = self.track.copies(), "showcase mounted");
        Ok(())
    }

    /// Open the era behind a timeline card
    pub fn select_card(
        &mut self,
        display_index: usize,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        let Some(index) = self.track.original_index(display_index) else {
            tracing::debug!(display_index, "card outside the track");
            return false;
        };
        self.open_era_at(index, engine, surface)
    }

    /// Populate the modal from era `index` and play its entrance
    pub fn open_era_at(
        &mut self,
        index: usize,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if self.session.is_interactive() {
            tracing::debug!(index, "modal already open");
            return false;
        }
        let Some(record) = self.eras.get(index).cloned() else {
            tracing::debug!(index, "no era at index");
            return false;
        };

        if let Some(closing) = self.close_timeline.take() {
            closing.cancel(engine);
        }
        populate_modal(&record, surface);
        self.session.open(index);
        set_interactive(surface, true);

        let m = &self.timing;
        let slots = DemoSlot::ALL.into_iter().map(|slot| {
            MotionTarget::new(slot.element_id(), m.slot_duration_ms)
                .from_to(Property::Opacity, 0.0, 1.0)
                .from_to(Property::TranslateY, m.slot_offset_y, 0.0)
                .ease(Easing::EaseOutQuad)
        });
        let timeline = Timeline::new()
            .at(0.0, MotionPreset::fade_to(ids::MODAL_OVERLAY, 1.0, m.overlay_fade_ms))
            .at(
                m.content_delay_ms,
                MotionTarget::new(ids::MODAL_CONTENT, m.content_duration_ms)
                    .to(Property::Opacity, 1.0)
                    .to(Property::TranslateY, 0.0)
                    .ease(Easing::back(m.content_overshoot)),
            )
            .stagger(m.slot_delay_ms, slots, StaggerConfig::new(m.slot_stagger_ms));

        self.open_timeline = play(timeline, engine, surface, cues::MODAL_REVEALED);
        tracing::info!(index, title = %record.title, "era opened");
        true
    }

    /// Close the modal. Honored while opening or open.
    pub fn close(&mut self, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) -> bool {
        if self.session.close().is_none() {
            return false;
        }
        set_interactive(surface, false);
        if let Some(opening) = self.open_timeline.take() {
            opening.cancel(engine);
        }
        self.demos.unbind();
        if let Some(mut tilt) = self.surface_tilt.take() {
            tilt.on_leave(engine, surface);
        }

        let m = &self.timing;
        let timeline = Timeline::new()
            .at(
                0.0,
                MotionTarget::new(ids::MODAL_CONTENT, m.close_duration_ms)
                    .to(Property::Opacity, 0.0)
                    .to(Property::TranslateY, m.closed_offset_y),
            )
            .at(
                m.overlay_close_delay_ms,
                MotionPreset::fade_to(ids::MODAL_OVERLAY, 0.0, m.close_duration_ms),
            );
        self.close_timeline = play(timeline, engine, surface, cues::MODAL_CLOSED);
        true
    }

    /// React to a completion cue. Returns whether the cue belonged to the
    /// modal sequence.
    pub fn on_cue(&mut self, cue: Cue, surface: &mut dyn RenderSurface) -> bool {
        match cue {
            cues::MODAL_REVEALED => {
                self.open_timeline = None;
                if self.session.revealed().is_some() {
                    self.bind_demos(surface);
                }
                true
            }
            cues::MODAL_CLOSED => {
                self.close_timeline = None;
                self.session.faded();
                true
            }
            _ => false,
        }
    }

    /// Route an input event. Returns whether the modal layer consumed it;
    /// while the modal is interactive the overlay consumes every event.
    pub fn handle(
        &mut self,
        event: &Event,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if !self.session.is_interactive() {
            if event.event_type == event_types::CLICK {
                if let Some(display) = LoopTrack::parse_card_id(&event.target) {
                    return self.select_card(display, engine, surface);
                }
            }
            return false;
        }

        match event.event_type {
            event_types::CLICK => {
                let target = event.target.as_str();
                if target == ids::MODAL_CLOSE || target == ids::MODAL_OVERLAY {
                    self.close(engine, surface);
                } else {
                    self.demos.handle(event, engine, surface);
                }
            }
            event_types::KEY_DOWN => {
                if matches!(event.data, EventData::Key { key } if key == KeyCode::ESCAPE) {
                    self.close(engine, surface);
                }
            }
            event_types::POINTER_MOVE => {
                if let (Some(tilt), Some(at)) = (self.surface_tilt.as_mut(), event.position()) {
                    tilt.on_move(at, engine, surface);
                }
            }
            event_types::POINTER_LEAVE => {
                if let Some(tilt) = self.surface_tilt.as_mut() {
                    if event.target == *tilt.frame() {
                        tilt.on_leave(engine, surface);
                    }
                }
            }
            _ => {}
        }
        true
    }

    fn bind_demos(&mut self, surface: &mut dyn RenderSurface) {
        let style = self.open_era().and_then(EraRecord::style);
        self.demos.bind(style, surface);

        if style == Some(EraStyle::Hybrid) {
            let tilt = PointerFollow::new(ids::MODAL_CONTENT)
                .layer(FollowLayer::tilt(ids::MODAL_CONTENT, self.timing.tilt_max_degrees))
                .map(|f| f.on_exit(TILT_RETURN_MS, Easing::elastic(1.0, 0.5)));
            match tilt {
                Ok(tilt) => self.surface_tilt = Some(tilt),
                Err(err) => tracing::warn!(%err, "surface tilt disabled"),
            }
        }
    }
}

impl std::fmt::Debug for ShowcaseOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowcaseOrchestrator")
            .field("eras", &self.eras.len())
            .field("track", &self.track)
            .field("phase", &self.phase())
            .field("open_era_index", &self.open_era_index())
            .finish_non_exhaustive()
    }
}

fn play(
    timeline: Timeline,
    engine: &mut MotionScheduler,
    surface: &mut dyn RenderSurface,
    cue: Cue,
) -> Option<TimelineHandle> {
    match timeline.play(engine, surface, Some(cue)) {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(%err, ?cue, "modal timeline rejected");
            // Deliver the cue anyway so the phase still advances
            Some(TimelineHandle {
                motions: Vec::new(),
                end: Some(engine.after(0.0, cue)),
            })
        }
    }
}

fn set_interactive(surface: &mut dyn RenderSurface, enabled: bool) {
    if let Err(err) = surface.set_pointer_events(&ElementId::new(ids::MODAL_OVERLAY), enabled) {
        tracing::debug!(%err, "overlay missing");
    }
}

/// Copy a record's text, demo markup and style class into the modal
fn populate_modal(record: &EraRecord, surface: &mut dyn RenderSurface) {
    let texts = [
        (ids::MODAL_TITLE, record.title.as_str()),
        (ids::MODAL_YEAR, record.year.as_str()),
        (ids::MODAL_DESC, record.description.as_str()),
    ];
    for (id, text) in texts {
        if let Err(err) = surface.set_text(&ElementId::new(id), text) {
            tracing::debug!(%err, "modal field skipped");
        }
    }
    for slot in DemoSlot::ALL {
        if let Err(err) = surface.set_markup(&ElementId::new(slot.element_id()), record.demos.get(slot)) {
            tracing::debug!(%err, "demo slot skipped");
        }
    }
    let class = format!("modal-content {}", record.style_class);
    if let Err(err) = surface.set_class(&ElementId::new(ids::MODAL_CONTENT), &class) {
        tracing::debug!(%err, "modal content missing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::builtin_eras;
    use crate::scene::build_scene;
    use epoch_core::{Point, SceneSurface};

    struct Harness {
        orchestrator: ShowcaseOrchestrator,
        engine: MotionScheduler,
        scene: SceneSurface,
    }

    impl Harness {
        fn new() -> Self {
            let config = ShowcaseConfig::default();
            let mut scene = build_scene(&config);
            let mut engine = MotionScheduler::new();
            let mut orchestrator = ShowcaseOrchestrator::new(builtin_eras(), &config).unwrap();
            orchestrator.mount(&mut engine, &mut scene).unwrap();
            Self {
                orchestrator,
                engine,
                scene,
            }
        }

        fn run(&mut self, ms: f32) {
            let mut t = 0.0;
            while t < ms {
                for done in self.engine.tick(16.0, &mut self.scene) {
                    if let Some(cue) = done.cue {
                        self.orchestrator.on_cue(cue, &mut self.scene);
                    }
                }
                t += 16.0;
            }
        }

        fn send(&mut self, event: Event) -> bool {
            self.orchestrator.handle(&event, &mut self.engine, &mut self.scene)
        }

        fn overlay_interactive(&self) -> Option<bool> {
            self.scene.pointer_events(&ElementId::new(ids::MODAL_OVERLAY))
        }
    }

    #[test]
    fn test_mount_hides_modal_and_scrolls() {
        let mut h = Harness::new();
        assert_eq!(h.overlay_interactive(), Some(false));
        assert_eq!(h.scene.children(&ElementId::new(ids::TIMELINE_TRACK)).len(), 18);
        h.run(1000.0);
        let track = ElementId::new(ids::TIMELINE_TRACK);
        assert!(h.scene.property_or_rest(&track, Property::TranslateX) < 0.0);
        assert!(h.engine.is_active(h.orchestrator.scroll_handle().unwrap()));
    }

    #[test]
    fn test_mount_requires_track() {
        let config = ShowcaseConfig::default();
        let mut scene = SceneSurface::new();
        let mut engine = MotionScheduler::new();
        let mut orchestrator = ShowcaseOrchestrator::new(builtin_eras(), &config).unwrap();
        assert_eq!(
            orchestrator.mount(&mut engine, &mut scene),
            Err(ShowcaseError::MissingScene(ids::TIMELINE_TRACK.to_string()))
        );
    }

    #[test]
    fn test_card_selects_wrapped_era() {
        let mut h = Harness::new();
        assert!(h.send(Event::click(LoopTrack::card_id(7), 0)));
        assert_eq!(h.orchestrator.phase(), ModalPhase::Opening);
        assert_eq!(h.orchestrator.open_era_index(), Some(1));
        assert_eq!(h.scene.text(&ElementId::new(ids::MODAL_TITLE)), Some("Web 2.0 Gloss"));
        assert_eq!(
            h.scene.class(&ElementId::new(ids::MODAL_CONTENT)),
            Some("modal-content modal-glossy")
        );
        assert_eq!(h.overlay_interactive(), Some(true));
    }

    #[test]
    fn test_out_of_range_card_is_ignored() {
        let mut h = Harness::new();
        let mut engine = MotionScheduler::new();
        assert!(!h.orchestrator.select_card(18, &mut engine, &mut h.scene));
        assert!(!h.orchestrator.open_era_at(6, &mut engine, &mut h.scene));
        assert_eq!(h.orchestrator.phase(), ModalPhase::Closed);
    }

    #[test]
    fn test_demos_bind_after_reveal() {
        let mut h = Harness::new();
        h.send(Event::click(LoopTrack::card_id(0), 0));
        h.run(500.0);
        assert_eq!(h.orchestrator.phase(), ModalPhase::Opening);
        assert!(!h.orchestrator.demos().is_bound());

        // Slots are mid-cascade: the first is further along than the last
        let first = h.scene.property_or_rest(&ElementId::new("demo-nav"), Property::Opacity);
        let last = h.scene.property_or_rest(&ElementId::new("demo-carousel"), Property::Opacity);
        assert!(first > last);

        h.run(600.0);
        assert_eq!(h.orchestrator.phase(), ModalPhase::Open);
        assert!(h.orchestrator.demos().is_bound());
        assert_eq!(h.scene.property_or_rest(&ElementId::new("demo-carousel"), Property::Opacity), 1.0);
    }

    #[test]
    fn test_close_while_opening_converges() {
        let mut h = Harness::new();
        h.send(Event::click(LoopTrack::card_id(3), 0));
        h.run(48.0);
        assert!(h.send(Event::click(ElementId::new(ids::MODAL_CLOSE), 48)));
        assert_eq!(h.orchestrator.phase(), ModalPhase::Closing);
        assert_eq!(h.overlay_interactive(), Some(false));

        h.run(1500.0);
        assert_eq!(h.orchestrator.phase(), ModalPhase::Closed);
        assert_eq!(h.orchestrator.open_era_index(), None);
        assert!(!h.orchestrator.demos().is_bound());
        let content = ElementId::new(ids::MODAL_CONTENT);
        assert_eq!(h.scene.property_or_rest(&content, Property::Opacity), 0.0);
        assert_eq!(h.scene.property_or_rest(&ElementId::new(ids::MODAL_OVERLAY), Property::Opacity), 0.0);
    }

    #[test]
    fn test_escape_only_when_interactive() {
        let mut h = Harness::new();
        assert!(!h.send(Event::key_down(KeyCode::ESCAPE, 0)));
        assert_eq!(h.orchestrator.phase(), ModalPhase::Closed);

        h.send(Event::click(LoopTrack::card_id(2), 0));
        h.run(1200.0);
        h.send(Event::key_down(KeyCode::ESCAPE, 1200));
        assert_eq!(h.orchestrator.phase(), ModalPhase::Closing);
    }

    #[test]
    fn test_reopen_while_closing() {
        let mut h = Harness::new();
        h.send(Event::click(LoopTrack::card_id(0), 0));
        h.run(1200.0);
        h.send(Event::click(ElementId::new(ids::MODAL_OVERLAY), 1200));
        h.run(100.0);
        assert!(h.send(Event::click(LoopTrack::card_id(4), 1300)));
        assert_eq!(h.orchestrator.open_era_index(), Some(4));

        // The cancelled close never fades the new session out
        h.run(1200.0);
        assert_eq!(h.orchestrator.phase(), ModalPhase::Open);
        assert_eq!(h.overlay_interactive(), Some(true));
    }

    #[test]
    fn test_hybrid_surface_tilts_and_returns() {
        let mut h = Harness::new();
        h.send(Event::click(LoopTrack::card_id(5), 0));
        h.run(1200.0);
        assert!(h.orchestrator.has_surface_tilt());

        let content = ElementId::new(ids::MODAL_CONTENT);
        let bounds = h.scene.bounds(&content).unwrap();
        let corner = Point::new(bounds.x() + bounds.width() - 1.0, bounds.y() + 1.0);
        h.send(Event::pointer(event_types::POINTER_MOVE, content.clone(), corner, 1200));
        h.run(600.0);
        let tilt = h.scene.property_or_rest(&content, Property::RotateY);
        assert!(tilt > 4.0 && tilt <= 5.0, "{tilt}");

        h.send(Event::pointer(event_types::POINTER_LEAVE, content.clone(), corner, 1800));
        h.run(600.0);
        assert_eq!(h.scene.property_or_rest(&content, Property::RotateY), 0.0);
    }

    #[test]
    fn test_non_hybrid_eras_do_not_tilt() {
        let mut h = Harness::new();
        h.send(Event::click(LoopTrack::card_id(4), 0));
        h.run(1200.0);
        assert!(!h.orchestrator.has_surface_tilt());
    }
}
