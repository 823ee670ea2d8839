//! Page scene for headless runs
//!
//! [`build_scene`] lays out every element the showcase addresses on a
//! 1280 px wide page. Chapter sections stack below the hero; the modal and
//! cursor elements sit in the first viewport.

use crate::config::ShowcaseConfig;
use crate::era::DemoSlot;
use epoch_core::{ElementId, Rect, RenderSurface, SceneSurface};

pub const PAGE_WIDTH: f32 = 1280.0;
pub const VIEWPORT_HEIGHT: f32 = 720.0;
/// Width of one timeline card
pub const CARD_WIDTH: f32 = 220.0;

/// Element ids shared by the scene and the runtime
pub mod ids {
    pub const HERO: &str = "hero";
    pub const HERO_BLOB_COUNT: usize = 4;

    pub const TIMELINE_TRACK: &str = "timeline-track";

    pub const ELASTIC_CARD: &str = "elastic-card";
    pub const LIQUID_NAV: &str = "liquid-nav";
    pub const LIQUID_BLOB: &str = "liquid-blob";
    pub const JELLY_BUTTON: &str = "jelly-btn";
    pub const MAGNETIC_AREA: &str = "mag-area";
    pub const MAGNETIC_BUTTON: &str = "mag-btn";
    pub const SQUEEZE_TRACK: &str = "squeeze-track";

    pub const GLASS_CARD: &str = "glass-card";
    pub const GLASS_SLIDER_TRACK: &str = "glass-slider-track";
    pub const GLASS_SLIDER_THUMB: &str = "glass-slider-thumb";
    pub const GLASS_SLIDER_FILL: &str = "glass-slider-fill";

    pub const HYBRID_NAV: &str = "hybrid-nav";
    pub const HYBRID_NAV_BLOB: &str = "hybrid-nav-blob";
    pub const FROST_LINK_COUNT: usize = 3;
    pub const WORM_NAV: &str = "worm-nav";
    pub const WORM_LINE: &str = "worm-line";
    pub const GLAZED_BUTTON: &str = "glazed-btn";
    pub const LIQUID_SLIDER_TRACK: &str = "liquid-slider-track";
    pub const LIQUID_SLIDER_THUMB: &str = "liquid-slider-thumb";
    pub const ROTARY_KNOB: &str = "rotary-knob";

    pub const CLICK_SLIDE: &str = "click-slide";
    pub const CLICK_PREV: &str = "click-prev";
    pub const CLICK_NEXT: &str = "click-next";

    pub const MODAL_OVERLAY: &str = "modal-overlay";
    pub const MODAL_CONTENT: &str = "modal-content";
    pub const MODAL_TITLE: &str = "modal-title";
    pub const MODAL_YEAR: &str = "modal-year";
    pub const MODAL_DESC: &str = "modal-desc";
    pub const MODAL_CLOSE: &str = "modal-close";

    pub const CURSOR_DOT: &str = "cursor-dot";
    pub const CURSOR_OUTLINE: &str = "cursor-outline";

    pub fn hero_blob(index: usize) -> String {
        format!("hero-blob-{index}")
    }

    pub fn frost_link(index: usize) -> String {
        format!("frost-link-{index}")
    }
}

/// Thumb travel of a slider track of `track_width` with a `thumb_width` thumb
pub fn slider_travel(track_width: f32, thumb_width: f32) -> f32 {
    (track_width - thumb_width).max(0.0)
}

const THUMB: f32 = 30.0;
const SLIDER_WIDTH: f32 = 300.0;
const SQUEEZE_ITEMS: usize = 5;
const NAV_ITEMS: &str = "<span>Home</span><span>Work</span><span>About</span><span>Contact</span>";

fn add(scene: &mut SceneSurface, id: impl AsRef<str>, x: f32, y: f32, w: f32, h: f32) -> ElementId {
    let id = ElementId::new(id);
    scene.insert(id.clone(), Rect::new(x, y, w, h));
    id
}

fn nav(scene: &mut SceneSurface, id: &str, x: f32, y: f32) {
    let nav = add(scene, id, x, y, 400.0, 50.0);
    // Root-level ids always exist, markup cannot fail here
    let _ = scene.set_markup(&nav, NAV_ITEMS);
}

/// Build the page scene for `config`'s era table and loop length
pub fn build_scene(config: &ShowcaseConfig) -> SceneSurface {
    let mut scene = SceneSurface::new();

    // Hero
    add(&mut scene, ids::HERO, 0.0, 0.0, PAGE_WIDTH, VIEWPORT_HEIGHT);
    for i in 0..ids::HERO_BLOB_COUNT {
        let x = 120.0 + 280.0 * i as f32;
        add(&mut scene, ids::hero_blob(i), x, 200.0, 300.0, 300.0);
    }

    // Timeline
    let cards = config.eras().len() * config.timeline.copies;
    add(&mut scene, ids::TIMELINE_TRACK, 0.0, 800.0, cards as f32 * CARD_WIDTH, 160.0);

    // Fluid chapter
    add(&mut scene, ids::ELASTIC_CARD, 100.0, 1100.0, 300.0, 200.0);
    nav(&mut scene, ids::LIQUID_NAV, 480.0, 1100.0);
    add(&mut scene, ids::LIQUID_BLOB, 480.0, 1100.0, 100.0, 50.0);
    add(&mut scene, ids::JELLY_BUTTON, 950.0, 1100.0, 160.0, 60.0);
    add(&mut scene, ids::MAGNETIC_AREA, 100.0, 1400.0, 300.0, 200.0);
    add(&mut scene, ids::MAGNETIC_BUTTON, 200.0, 1475.0, 100.0, 50.0);
    let squeeze = add(&mut scene, ids::SQUEEZE_TRACK, 480.0, 1400.0, 700.0, 200.0);
    let items = "<div>01</div>".repeat(SQUEEZE_ITEMS);
    let _ = scene.set_markup(&squeeze, &items);

    // Glass chapter
    add(&mut scene, ids::GLASS_CARD, 100.0, 1700.0, 320.0, 200.0);
    add(&mut scene, ids::GLASS_SLIDER_TRACK, 480.0, 1700.0, SLIDER_WIDTH, 20.0);
    add(&mut scene, ids::GLASS_SLIDER_THUMB, 480.0, 1695.0, THUMB, THUMB);
    add(&mut scene, ids::GLASS_SLIDER_FILL, 480.0, 1700.0, 0.0, 20.0);

    // Hybrid chapter
    nav(&mut scene, ids::HYBRID_NAV, 100.0, 2000.0);
    add(&mut scene, ids::HYBRID_NAV_BLOB, 100.0, 2000.0, 100.0, 50.0);
    for i in 0..ids::FROST_LINK_COUNT {
        add(&mut scene, ids::frost_link(i), 600.0 + 120.0 * i as f32, 2000.0, 100.0, 40.0);
    }
    nav(&mut scene, ids::WORM_NAV, 100.0, 2100.0);
    add(&mut scene, ids::WORM_LINE, 100.0, 2146.0, 100.0, 4.0);
    add(&mut scene, ids::GLAZED_BUTTON, 600.0, 2100.0, 160.0, 60.0);
    add(&mut scene, ids::LIQUID_SLIDER_TRACK, 100.0, 2250.0, SLIDER_WIDTH, 20.0);
    add(&mut scene, ids::LIQUID_SLIDER_THUMB, 100.0, 2245.0, THUMB, THUMB);
    add(&mut scene, ids::ROTARY_KNOB, 600.0, 2220.0, 150.0, 150.0);

    // Solid chapter
    let slide = add(&mut scene, ids::CLICK_SLIDE, 100.0, 2450.0, 240.0, 160.0);
    let _ = scene.set_text(&slide, "IMG_01");
    add(&mut scene, ids::CLICK_PREV, 100.0, 2620.0, 60.0, 30.0);
    add(&mut scene, ids::CLICK_NEXT, 280.0, 2620.0, 60.0, 30.0);

    // Modal
    add(&mut scene, ids::MODAL_OVERLAY, 0.0, 0.0, PAGE_WIDTH, VIEWPORT_HEIGHT);
    let content = add(&mut scene, ids::MODAL_CONTENT, 240.0, 60.0, 800.0, 600.0);
    for (i, id) in [ids::MODAL_TITLE, ids::MODAL_YEAR, ids::MODAL_DESC, ids::MODAL_CLOSE]
        .into_iter()
        .enumerate()
    {
        let _ = scene.insert_child(&content, ElementId::new(id), Rect::new(260.0, 80.0 + 40.0 * i as f32, 500.0, 32.0));
    }
    for (i, slot) in DemoSlot::ALL.into_iter().enumerate() {
        let _ = scene.insert_child(
            &content,
            ElementId::new(slot.element_id()),
            Rect::new(260.0, 260.0 + 72.0 * i as f32, 760.0, 60.0),
        );
    }

    // Cursor
    add(&mut scene, ids::CURSOR_DOT, 0.0, 0.0, 8.0, 8.0);
    add(&mut scene, ids::CURSOR_OUTLINE, 0.0, 0.0, 40.0, 40.0);

    scene
}
