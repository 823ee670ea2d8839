//! Interactive demos inside the era modal
//!
//! Each [`EraStyle`] maps to a [`StyleBehavior`] record: how a nav item looks
//! at rest, how it activates, and how the demo button answers a press.
//! Classes without an entry get [`StyleBehavior::DEFAULT`].
//!
//! [`DemoPanel`] binds those behaviors to the elements created from the
//! injected demo markup and routes clicks to them.

use crate::era::{DemoSlot, EraStyle};
use epoch_animation::{Easing, MotionPreset, MotionScheduler, MotionTarget};
use epoch_core::events::event_types;
use epoch_core::{ElementId, Event, EventRouter, NodeInfo, Property, RenderSurface};
use epoch_interact::issue;

/// Demo hook applied to one element
pub type DemoFn = fn(&ElementId, &mut MotionScheduler, &mut dyn RenderSurface);

/// Class marking the active nav item
pub const NAV_ACTIVE_CLASS: &str = "nav-active";

/// Horizontal arrow nudge distance
const ARROW_NUDGE: f32 = 5.0;

/// Per-style demo behavior
#[derive(Clone, Copy)]
pub struct StyleBehavior {
    pub reset: DemoFn,
    pub activate: DemoFn,
    pub press: DemoFn,
}

impl StyleBehavior {
    /// Fallback for unknown style classes
    pub const DEFAULT: StyleBehavior = StyleBehavior {
        reset: no_op,
        activate: no_op,
        press: default_press,
    };

    pub fn for_style(style: Option<EraStyle>) -> StyleBehavior {
        let Some(style) = style else {
            return Self::DEFAULT;
        };
        match style {
            EraStyle::Retro => StyleBehavior {
                reset: retro_reset,
                activate: retro_activate,
                press: retro_press,
            },
            EraStyle::Glossy => StyleBehavior {
                reset: glossy_reset,
                activate: glossy_activate,
                press: default_press,
            },
            EraStyle::Flat => StyleBehavior {
                reset: flat_reset,
                activate: flat_activate,
                press: default_press,
            },
            EraStyle::Material => StyleBehavior {
                reset: material_reset,
                activate: material_activate,
                press: default_press,
            },
            EraStyle::Glass => StyleBehavior {
                reset: clear_reset,
                activate: glass_activate,
                press: default_press,
            },
            EraStyle::Hybrid => StyleBehavior {
                reset: clear_reset,
                activate: hybrid_activate,
                press: hybrid_press,
            },
        }
    }
}

impl std::fmt::Debug for StyleBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleBehavior").finish_non_exhaustive()
    }
}

fn styles(surface: &mut dyn RenderSurface, element: &ElementId, declarations: &[(&str, &str)]) {
    for (name, value) in declarations {
        if let Err(err) = surface.set_style(element, name, value) {
            tracing::debug!(%err, "demo style skipped");
            return;
        }
    }
}

fn no_op(_: &ElementId, _: &mut MotionScheduler, _: &mut dyn RenderSurface) {}

fn default_press(el: &ElementId, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    issue(engine, MotionPreset::press(el.clone()), surface);
}

// ============================================================================
// Retro
// ============================================================================

fn retro_reset(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(surface, el, &[("background", "transparent"), ("box-shadow", "none")]);
}

fn retro_activate(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(
        surface,
        el,
        &[("background", "rgba(0,255,0,0.2)"), ("box-shadow", "0 0 10px #0f0")],
    );
}

fn retro_press(el: &ElementId, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    issue(engine, MotionPreset::glow_pulse(el.clone()), surface);
}

// ============================================================================
// Glossy
// ============================================================================

fn glossy_reset(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(surface, el, &[("background", "linear-gradient(to bottom, #666, #333)")]);
}

fn glossy_activate(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(surface, el, &[("background", "linear-gradient(to bottom, #8a8, #565)")]);
}

// ============================================================================
// Flat
// ============================================================================

fn flat_reset(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(surface, el, &[("border-bottom", "none"), ("color", "#bdc3c7")]);
}

fn flat_activate(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(
        surface,
        el,
        &[("border-bottom", "2px solid #3498db"), ("color", "#3498db")],
    );
}

// ============================================================================
// Material
// ============================================================================

fn material_reset(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(surface, el, &[("background", "transparent"), ("color", "#6750A4")]);
}

fn material_activate(el: &ElementId, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    issue(
        engine,
        MotionPreset::pop_in(el.clone(), 0.95, 300.0, Easing::back(2.0)),
        surface,
    );
    styles(surface, el, &[("background", "#6750A4"), ("color", "white")]);
}

// ============================================================================
// Glass and hybrid
// ============================================================================

fn clear_reset(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(surface, el, &[("background", "transparent"), ("border", "none")]);
}

fn glass_activate(el: &ElementId, _: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    styles(
        surface,
        el,
        &[
            ("background", "rgba(255,255,255,0.15)"),
            ("border", "1px solid rgba(255,255,255,0.2)"),
        ],
    );
}

fn hybrid_activate(el: &ElementId, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    issue(
        engine,
        MotionTarget::new(el.clone(), 400.0)
            .from_to(Property::Scale, 0.9, 1.0)
            .from_to(Property::Opacity, 0.7, 1.0)
            .ease(Easing::elastic(1.0, 0.5)),
        surface,
    );
    styles(
        surface,
        el,
        &[
            (
                "background",
                "linear-gradient(135deg, rgba(139,92,246,0.3), rgba(6,182,212,0.3))",
            ),
            ("border", "1px solid rgba(139,92,246,0.4)"),
        ],
    );
}

fn hybrid_press(el: &ElementId, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    issue(engine, MotionPreset::stretch_press(el.clone()), surface);
}

// ============================================================================
// Panel
// ============================================================================

/// What a click on a bound demo element does
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DemoAction {
    /// Activate the nav item at this index
    NavItem(usize),
    Button,
    Badge,
    /// Nudge a carousel arrow by this many pixels
    Arrow(f32),
}

fn arrow_direction(text: &str) -> Option<f32> {
    if ["◀", "←", "PREV"].iter().any(|m| text.contains(m)) {
        Some(-ARROW_NUDGE)
    } else if ["▶", "→", "NEXT"].iter().any(|m| text.contains(m)) {
        Some(ARROW_NUDGE)
    } else {
        None
    }
}

fn slot_children(slot: DemoSlot, surface: &dyn RenderSurface) -> Vec<NodeInfo> {
    surface.children(&ElementId::new(slot.element_id()))
}

/// Click bindings for the demos of the currently open era
#[derive(Debug, Default)]
pub struct DemoPanel {
    behavior: Option<StyleBehavior>,
    router: EventRouter<DemoAction>,
    nav_items: Vec<ElementId>,
}

impl DemoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.behavior.is_some()
    }

    /// Number of bound elements
    pub fn binding_count(&self) -> usize {
        self.router.len()
    }

    /// Bind demo elements currently present in the slots, replacing any
    /// previous bindings. Returns the number of bound elements.
    pub fn bind(&mut self, style: Option<EraStyle>, surface: &dyn RenderSurface) -> usize {
        self.unbind();
        self.behavior = Some(StyleBehavior::for_style(style));

        self.nav_items = slot_children(DemoSlot::Nav, surface)
            .into_iter()
            .filter(|n| n.tag == "span" || n.tag == "a")
            .map(|n| n.id)
            .collect();
        for (i, item) in self.nav_items.iter().enumerate() {
            self.router
                .bind(item.clone(), event_types::CLICK, DemoAction::NavItem(i));
        }

        if let Some(button) = slot_children(DemoSlot::Button, surface)
            .into_iter()
            .find(|n| n.tag == "button")
        {
            self.router.bind(button.id, event_types::CLICK, DemoAction::Button);
        }

        if let Some(badge) = slot_children(DemoSlot::Badge, surface)
            .into_iter()
            .find(|n| n.tag == "span")
        {
            self.router.bind(badge.id, event_types::CLICK, DemoAction::Badge);
        }

        for node in slot_children(DemoSlot::Carousel, surface) {
            if node.tag != "span" {
                continue;
            }
            if let Some(dx) = arrow_direction(&node.text) {
                self.router.bind(node.id, event_types::CLICK, DemoAction::Arrow(dx));
            }
        }

        tracing::debug!(?style, bindings = self.router.len(), "demos bound");
        self.router.len()
    }

    pub fn unbind(&mut self) {
        self.behavior = None;
        self.router.clear();
        self.nav_items.clear();
    }

    /// Run the action bound to the event target. Returns whether one ran.
    pub fn handle(
        &mut self,
        event: &Event,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        let Some(behavior) = self.behavior else {
            return false;
        };
        let actions = self.router.route(event);
        for action in &actions {
            match *action {
                DemoAction::NavItem(index) => self.activate_nav(index, behavior, engine, surface),
                DemoAction::Button => (behavior.press)(&event.target, engine, surface),
                DemoAction::Badge => {
                    issue(engine, MotionPreset::badge_pulse(event.target.clone()), surface);
                }
                DemoAction::Arrow(dx) => {
                    issue(engine, MotionPreset::nudge(event.target.clone(), dx), surface);
                }
            }
        }
        !actions.is_empty()
    }

    fn activate_nav(
        &self,
        index: usize,
        behavior: StyleBehavior,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) {
        for item in &self.nav_items {
            if surface.set_class(item, "").is_ok() {
                (behavior.reset)(item, engine, surface);
            }
        }
        let Some(active) = self.nav_items.get(index) else {
            return;
        };
        if let Err(err) = surface.set_class(active, NAV_ACTIVE_CLASS) {
            tracing::debug!(%err, "nav item vanished");
            return;
        }
        (behavior.activate)(active, engine, surface);
    }
}
