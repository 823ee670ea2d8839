//! Integration tests for the full showcase runtime
//!
//! These tests drive a [`Showcase`] over an in-memory scene and verify that:
//! - Timeline cards resolve to the right era and the modal converges to closed
//! - Demo behaviors only become interactive after the staggered reveal
//! - Retargeting never leaves two motions competing for a property
//! - Drag positions and squeeze signals stay inside their bounds

use epoch_core::events::event_types;
use epoch_core::{ElementId, Event, KeyCode, Point, Property, RenderSurface, SceneSurface};
use epoch_interact::DragPhase;
use epoch_showcase::{build_scene, ids, LoopTrack, ModalPhase, Showcase, ShowcaseConfig};

fn showcase() -> Showcase<SceneSurface> {
    let config = ShowcaseConfig::default();
    Showcase::new(build_scene(&config), &config).unwrap()
}

fn run(showcase: &mut Showcase<SceneSurface>, ms: f32) {
    let mut t = 0.0;
    while t < ms {
        showcase.tick(16.0);
        t += 16.0;
    }
}

fn overlay_interactive(showcase: &Showcase<SceneSurface>) -> Option<bool> {
    showcase
        .surface()
        .pointer_events(&ElementId::new(ids::MODAL_OVERLAY))
}

/// Six eras, three copies, card 7 opens the second era and closing restores
/// a non-interactive overlay
#[test]
fn test_card_seven_opens_second_era_and_closes() {
    let mut s = showcase();
    assert_eq!(s.orchestrator().track().len(), 18);

    assert!(s.handle(&Event::click(LoopTrack::card_id(7), 0)));
    assert_eq!(s.orchestrator().open_era_index(), Some(1));
    assert_eq!(
        s.surface().class(&ElementId::new(ids::MODAL_CONTENT)),
        Some("modal-content modal-glossy")
    );
    assert_eq!(
        s.surface().text(&ElementId::new(ids::MODAL_YEAR)),
        Some("2005")
    );

    run(&mut s, 1200.0);
    assert_eq!(s.phase(), ModalPhase::Open);

    s.handle(&Event::click(ElementId::new(ids::MODAL_CLOSE), 1200));
    run(&mut s, 600.0);
    assert_eq!(s.phase(), ModalPhase::Closed);
    assert_eq!(overlay_interactive(&s), Some(false));
}

/// Every card index opens a record and an immediate close still converges
#[test]
fn test_open_then_immediate_close_converges_for_every_card() {
    for display in 0..18 {
        let mut s = showcase();
        assert!(s.select_card(display));
        s.handle(&Event::key_down(KeyCode::ESCAPE, 0));
        assert_eq!(s.phase(), ModalPhase::Closing);
        assert_eq!(overlay_interactive(&s), Some(false));

        run(&mut s, 1500.0);
        assert_eq!(s.phase(), ModalPhase::Closed, "card {display}");
        assert_eq!(s.orchestrator().open_era_index(), None);
        assert!(!s.orchestrator().demos().is_bound());
    }
}

#[test]
fn test_badge_pulses_only_after_reveal() {
    let mut s = showcase();
    s.select_card(4);
    let badge = ElementId::new("demo-badge/0");

    // Markup is injected immediately but nothing is bound yet
    assert!(s.surface().exists(&badge));
    s.handle(&Event::click(badge.clone(), 0));
    run(&mut s, 160.0);
    assert_eq!(s.surface().property(&badge, Property::Scale), None);

    run(&mut s, 1000.0);
    assert_eq!(s.phase(), ModalPhase::Open);
    s.handle(&Event::click(badge.clone(), 1200));
    run(&mut s, 192.0);
    assert!(s.surface().property_or_rest(&badge, Property::Scale) > 1.15);
    run(&mut s, 400.0);
    assert_eq!(s.surface().property(&badge, Property::Scale), Some(1.0));
}

#[test]
fn test_escape_ignored_while_closed() {
    let mut s = showcase();
    assert!(!s.handle(&Event::key_down(KeyCode::ESCAPE, 0)));
    assert_eq!(s.phase(), ModalPhase::Closed);
    assert_eq!(overlay_interactive(&s), Some(false));
}

/// Two rapid retargets leave exactly one motion in flight, aimed at the
/// second goal
#[test]
fn test_rapid_retarget_leaves_one_motion() {
    let mut s = showcase();
    let area = ElementId::new(ids::MAGNETIC_AREA);
    let button = ElementId::new(ids::MAGNETIC_BUTTON);
    let center = s.surface().bounds(&area).unwrap().center();

    s.handle(&Event::pointer(
        event_types::POINTER_MOVE,
        area.clone(),
        Point::new(center.x + 40.0, center.y),
        0,
    ));
    s.tick(16.0);
    s.handle(&Event::pointer(
        event_types::POINTER_MOVE,
        area.clone(),
        Point::new(center.x - 60.0, center.y),
        16,
    ));

    let in_flight = s.engine().in_flight(&button, Property::TranslateX);
    assert_eq!(in_flight.len(), 1);
    assert_eq!(in_flight[0].1, -30.0);

    // The new motion starts from where the old one was interrupted
    let interrupted = s.surface().property_or_rest(&button, Property::TranslateX);
    assert!(interrupted > 0.0);
    s.tick(16.0);
    assert!(s.surface().property_or_rest(&button, Property::TranslateX) < interrupted);
}

#[test]
fn test_cursor_outline_retargets_instead_of_queueing() {
    let mut s = showcase();
    let outline = ElementId::new(ids::CURSOR_OUTLINE);
    for i in 0..10u64 {
        let at = Point::new(100.0 + 10.0 * i as f32, 50.0);
        s.handle(&Event::pointer(event_types::POINTER_MOVE, ElementId::new(ids::HERO), at, i * 4));
    }
    assert_eq!(s.engine().in_flight(&outline, Property::Left).len(), 1);
    assert_eq!(
        s.surface().property(&ElementId::new(ids::CURSOR_DOT), Property::Left),
        Some(190.0)
    );
    run(&mut s, 600.0);
    assert_eq!(s.surface().property(&outline, Property::Left), Some(190.0));
}

#[test]
fn test_hero_blobs_return_to_rest_after_exit() {
    let mut s = showcase();
    let hero = ElementId::new(ids::HERO);
    s.handle(&Event::pointer(event_types::POINTER_MOVE, hero.clone(), Point::new(1000.0, 600.0), 0));
    run(&mut s, 800.0);
    let inverse = ElementId::new(ids::hero_blob(1));
    assert!(s.surface().property_or_rest(&inverse, Property::TranslateX) < 0.0);

    // Crossing the frame boundary outward counts as an exit
    s.handle(&Event::pointer(event_types::POINTER_MOVE, hero, Point::new(1000.0, 900.0), 800));
    run(&mut s, 2100.0);
    for i in 0..ids::HERO_BLOB_COUNT {
        let blob = ElementId::new(ids::hero_blob(i));
        assert_eq!(s.surface().property(&blob, Property::TranslateX), Some(0.0));
        assert_eq!(s.surface().property(&blob, Property::TranslateY), Some(0.0));
    }
}

#[test]
fn test_knob_stays_in_bounds_under_extreme_velocity() {
    let mut s = showcase();
    let knob = ElementId::new(ids::ROTARY_KNOB);
    s.handle(&Event::drag(event_types::DRAG_START, knob.clone(), 0.0, 0));
    for (i, delta) in [40.0, 400.0, 40_000.0].into_iter().enumerate() {
        s.handle(&Event::drag(event_types::DRAG, knob.clone(), delta, i as u64 + 1));
        let angle = s.surface().property_or_rest(&knob, Property::Rotate);
        assert!((-135.0..=135.0).contains(&angle), "{angle}");
    }
    s.handle(&Event::drag(event_types::DRAG_END, knob.clone(), 0.0, 4));
    assert_eq!(s.draggable(ids::ROTARY_KNOB).unwrap().phase(), DragPhase::Releasing);

    for _ in 0..80 {
        s.tick(16.0);
        let angle = s.surface().property_or_rest(&knob, Property::Rotate);
        assert!((-135.0..=135.0).contains(&angle), "{angle}");
        let normalized = s.draggable(ids::ROTARY_KNOB).unwrap().normalized_position();
        assert!((0.0..=1.0).contains(&normalized));
    }
    let knob_state = s.draggable(ids::ROTARY_KNOB).unwrap();
    assert_eq!(knob_state.phase(), DragPhase::Idle);
    assert_eq!(knob_state.position(), 135.0);
}

#[test]
fn test_squeeze_is_clamped_for_fast_drags() {
    let mut s = showcase();
    let track = ElementId::new(ids::SQUEEZE_TRACK);
    s.handle(&Event::drag(event_types::DRAG_START, track.clone(), 0.0, 0));
    s.handle(&Event::drag(event_types::DRAG, track.clone(), 9_000.0, 1));
    run(&mut s, 160.0);

    let items = s.surface().children(&track);
    assert!(!items.is_empty());
    for item in &items {
        let scale = s.surface().property_or_rest(&item.id, Property::ScaleX);
        let skew = s.surface().property_or_rest(&item.id, Property::SkewX);
        assert!((0.6..=1.0).contains(&scale), "{scale}");
        assert!((-30.0..=30.0).contains(&skew), "{skew}");
    }

    s.handle(&Event::drag(event_types::DRAG_END, track.clone(), 0.0, 170));
    run(&mut s, 1000.0);
    for item in &items {
        assert_eq!(s.surface().property(&item.id, Property::ScaleX), Some(1.0));
        assert_eq!(s.surface().property(&item.id, Property::SkewX), Some(0.0));
    }
    let position = s.surface().property_or_rest(&track, Property::TranslateX);
    assert!((0.0..=400.0).contains(&position));
}

#[test]
fn test_liquid_slider_morphs_and_snaps_back() {
    let mut s = showcase();
    let thumb = ElementId::new(ids::LIQUID_SLIDER_THUMB);
    s.handle(&Event::drag(event_types::DRAG_START, thumb.clone(), 0.0, 0));
    run(&mut s, 240.0);
    assert_eq!(s.surface().property(&thumb, Property::Scale), Some(1.2));
    assert_eq!(s.surface().property(&thumb, Property::Morph), Some(1.0));

    s.handle(&Event::drag(event_types::DRAG, thumb.clone(), 90.0, 16));
    s.handle(&Event::drag(event_types::DRAG_END, thumb.clone(), 0.0, 32));
    // No inertia: released sliders settle where they were let go
    assert_eq!(s.draggable(ids::LIQUID_SLIDER_THUMB).unwrap().phase(), DragPhase::Idle);
    run(&mut s, 480.0);
    assert_eq!(s.surface().property(&thumb, Property::Scale), Some(1.0));
    assert_eq!(s.surface().property(&thumb, Property::Morph), Some(0.0));
    assert_eq!(s.surface().property(&thumb, Property::TranslateX), Some(90.0));
}

#[test]
fn test_jelly_button_wobbles_back_to_rest() {
    let mut s = showcase();
    let jelly = ElementId::new(ids::JELLY_BUTTON);
    assert!(s.handle(&Event::click(jelly.clone(), 0)));
    run(&mut s, 96.0);
    assert!(s.surface().property_or_rest(&jelly, Property::ScaleX) > 1.2);
    run(&mut s, 1000.0);
    assert_eq!(s.surface().property(&jelly, Property::ScaleX), Some(1.0));
    assert_eq!(s.surface().property(&jelly, Property::ScaleY), Some(1.0));
}
