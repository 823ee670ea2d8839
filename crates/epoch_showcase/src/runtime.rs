//! Showcase runtime
//!
//! [`Showcase`] owns the rendering surface, the motion engine, the
//! orchestrator and every chapter widget. Input flows in through
//! [`Showcase::handle`]; time flows in through [`Showcase::tick`].

use crate::config::ShowcaseConfig;
use crate::error::Result;
use crate::modal::ModalPhase;
use crate::orchestrator::ShowcaseOrchestrator;
use crate::scene::{ids, slider_travel};
use epoch_animation::{Completion, Easing, MotionPreset, MotionScheduler};
use epoch_core::events::event_types;
use epoch_core::{ElementId, Event, EventData, EventRouter, RenderSurface};
use epoch_interact::{
    ClickCarousel, CursorOverlay, DragAxis, Draggable, FollowLayer, PointerFollow,
    SlidingIndicator,
};

/// Slides in the solid chapter's click carousel
const CLICK_SLIDES: usize = 3;
/// Thumb size used by both sliders
const THUMB_WIDTH: f32 = 30.0;
/// Squeeze carousel travel
const SQUEEZE_TRAVEL: f32 = 400.0;

/// Chapter widget reactions, keyed by element and event type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WidgetAction {
    JellyPress,
    GlazedPress,
    /// Move the indicator at this index under the event target
    Indicator(usize),
    CarouselStep(isize),
}

pub struct Showcase<S: RenderSurface> {
    surface: S,
    engine: MotionScheduler,
    orchestrator: ShowcaseOrchestrator,
    cursor: CursorOverlay,
    follows: Vec<PointerFollow>,
    draggables: Vec<Draggable>,
    indicators: Vec<SlidingIndicator>,
    carousel: ClickCarousel,
    widgets: EventRouter<WidgetAction>,
}

impl<S: RenderSurface> Showcase<S> {
    /// Validate `config`, wire every widget and mount the timeline
    pub fn new(mut surface: S, config: &ShowcaseConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = MotionScheduler::new();
        let mut orchestrator = ShowcaseOrchestrator::new(config.eras(), config)?;
        orchestrator.mount(&mut engine, &mut surface)?;

        let indicators = vec![
            SlidingIndicator::liquid(ids::LIQUID_NAV, ids::LIQUID_BLOB),
            SlidingIndicator::island(ids::HYBRID_NAV, ids::HYBRID_NAV_BLOB),
            SlidingIndicator::worm(ids::WORM_NAV, ids::WORM_LINE),
        ];
        let widgets = bind_widgets(&indicators, &surface);

        let mut showcase = Self {
            follows: build_follows()?,
            draggables: build_draggables(config, &surface)?,
            cursor: CursorOverlay::new(ids::CURSOR_DOT, ids::CURSOR_OUTLINE, config.cursor.trail_ms),
            carousel: ClickCarousel::new(ids::CLICK_SLIDE, CLICK_SLIDES),
            surface,
            engine,
            orchestrator,
            indicators,
            widgets,
        };
        showcase.rest_indicators();
        Ok(showcase)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn engine(&self) -> &MotionScheduler {
        &self.engine
    }

    pub fn orchestrator(&self) -> &ShowcaseOrchestrator {
        &self.orchestrator
    }

    pub fn phase(&self) -> ModalPhase {
        self.orchestrator.phase()
    }

    pub fn cursor(&self) -> &CursorOverlay {
        &self.cursor
    }

    pub fn carousel(&self) -> &ClickCarousel {
        &self.carousel
    }

    /// Draggable bound to `handle`
    pub fn draggable(&self, handle: &str) -> Option<&Draggable> {
        self.draggables.iter().find(|d| d.handle().as_str() == handle)
    }

    /// Open the era behind a timeline card, as if it was clicked
    pub fn select_card(&mut self, display_index: usize) -> bool {
        self.orchestrator
            .select_card(display_index, &mut self.engine, &mut self.surface)
    }

    /// Route one input event. Returns whether anything reacted to it.
    pub fn handle(&mut self, event: &Event) -> bool {
        if event.event_type == event_types::POINTER_MOVE {
            if let Some(at) = event.position() {
                self.cursor.on_move(at, &mut self.engine, &mut self.surface);
            }
        }
        // Page follows return to rest even while the modal holds input
        let left = event.event_type == event_types::POINTER_LEAVE && self.leave_follows(event);
        if self
            .orchestrator
            .handle(event, &mut self.engine, &mut self.surface)
        {
            return true;
        }

        match event.event_type {
            event_types::POINTER_MOVE => {
                let Some(at) = event.position() else {
                    return false;
                };
                for follow in &mut self.follows {
                    follow.on_move(at, &mut self.engine, &mut self.surface);
                }
                true
            }
            event_types::POINTER_LEAVE => left,
            event_types::DRAG_START | event_types::DRAG | event_types::DRAG_END => self.handle_drag(event),
            _ => self.handle_widget(event),
        }
    }

    fn leave_follows(&mut self, event: &Event) -> bool {
        let mut handled = false;
        for follow in self.follows.iter_mut().filter(|f| *f.frame() == event.target) {
            follow.on_leave(&mut self.engine, &mut self.surface);
            handled = true;
        }
        handled
    }

    fn handle_drag(&mut self, event: &Event) -> bool {
        let Some(draggable) = self.draggables.iter_mut().find(|d| *d.handle() == event.target) else {
            return false;
        };
        match (event.event_type, &event.data) {
            (event_types::DRAG_START, _) => {
                draggable.on_grab(event.timestamp, &mut self.engine, &mut self.surface)
            }
            (event_types::DRAG, EventData::Drag { delta }) => draggable
                .on_drag(*delta, event.timestamp, &mut self.engine, &mut self.surface)
                .is_some(),
            (event_types::DRAG_END, _) => draggable.on_release(&mut self.engine, &mut self.surface),
            _ => false,
        }
    }

    fn handle_widget(&mut self, event: &Event) -> bool {
        let actions = self.widgets.route(event);
        for action in &actions {
            match *action {
                WidgetAction::JellyPress => {
                    play(MotionPreset::jelly_press(event.target.clone()), &mut self.engine, &mut self.surface)
                }
                WidgetAction::GlazedPress => {
                    play(MotionPreset::glazed_press(event.target.clone()), &mut self.engine, &mut self.surface)
                }
                WidgetAction::Indicator(index) => {
                    if let Some(indicator) = self.indicators.get_mut(index) {
                        indicator.select(&event.target, &mut self.engine, &mut self.surface);
                    }
                }
                WidgetAction::CarouselStep(direction) => {
                    self.carousel.step(direction, &mut self.surface);
                }
            }
        }
        !actions.is_empty()
    }

    /// Advance time by `dt_ms`, feed completion cues back to the orchestrator
    /// and follow drag coasts
    pub fn tick(&mut self, dt_ms: f32) -> Vec<Completion> {
        let completions = self.engine.tick(dt_ms, &mut self.surface);
        for completion in &completions {
            if let Some(cue) = completion.cue {
                self.orchestrator.on_cue(cue, &mut self.surface);
            }
        }
        for draggable in &mut self.draggables {
            draggable.sync(&mut self.engine, &mut self.surface);
        }
        completions
    }

    /// Put each indicator under its first item
    fn rest_indicators(&mut self) {
        for indicator in &mut self.indicators {
            indicator.select_index(0, &mut self.engine, &mut self.surface);
        }
    }
}

impl<S: RenderSurface> std::fmt::Debug for Showcase<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("orchestrator", &self.orchestrator)
            .field("follows", &self.follows.len())
            .field("draggables", &self.draggables.len())
            .finish_non_exhaustive()
    }
}

fn play(timeline: epoch_animation::Timeline, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
    if let Err(err) = timeline.play(engine, surface, None) {
        tracing::warn!(%err, "press timeline rejected");
    }
}

fn bind_widgets(indicators: &[SlidingIndicator], surface: &dyn RenderSurface) -> EventRouter<WidgetAction> {
    let mut router = EventRouter::new();
    router.bind(ElementId::new(ids::JELLY_BUTTON), event_types::CLICK, WidgetAction::JellyPress);
    router.bind(ElementId::new(ids::GLAZED_BUTTON), event_types::CLICK, WidgetAction::GlazedPress);
    router.bind(ElementId::new(ids::CLICK_PREV), event_types::CLICK, WidgetAction::CarouselStep(-1));
    router.bind(ElementId::new(ids::CLICK_NEXT), event_types::CLICK, WidgetAction::CarouselStep(1));

    for (index, indicator) in indicators.iter().enumerate() {
        // The worm crawls on hover, the blobs move on click
        let trigger = if indicator.container().as_str() == ids::WORM_NAV {
            event_types::POINTER_ENTER
        } else {
            event_types::CLICK
        };
        for item in surface.children(indicator.container()) {
            router.bind(item.id, trigger, WidgetAction::Indicator(index));
        }
    }
    router
}

fn build_follows() -> Result<Vec<PointerFollow>> {
    let hero_layers = [(0.3, 2000.0), (-0.25, 3000.0), (0.4, 2500.0), (-0.2, 2800.0)];
    let mut hero = PointerFollow::new(ids::HERO).on_exit(2000.0, Easing::elastic(1.0, 0.3));
    for (i, (multiplier, duration)) in hero_layers.into_iter().enumerate() {
        hero = hero.layer(
            FollowLayer::parallax(ids::hero_blob(i), multiplier)
                .duration(duration)
                .ease(Easing::EaseOutQuad),
        )?;
    }

    let mut follows = vec![
        hero,
        PointerFollow::new(ids::ELASTIC_CARD).layer(
            FollowLayer::damped(ids::ELASTIC_CARD, 0.1)
                .duration(100.0)
                .ease(Easing::Linear)
                .stretch(0.0005),
        )?,
        PointerFollow::new(ids::MAGNETIC_AREA)
            .layer(FollowLayer::damped(ids::MAGNETIC_BUTTON, 0.5).ease(Easing::Linear))?
            .on_exit(600.0, Easing::elastic(1.0, 0.4)),
        PointerFollow::new(ids::GLASS_CARD)
            .layer(FollowLayer::tilt(ids::GLASS_CARD, 10.0))?
            .on_exit(500.0, Easing::elastic(1.0, 0.4)),
    ];
    for i in 0..ids::FROST_LINK_COUNT {
        let link = ids::frost_link(i);
        follows.push(
            PointerFollow::new(link.as_str())
                .layer(FollowLayer::damped(link.as_str(), 0.4))?
                .on_exit(500.0, Easing::elastic(1.0, 0.4)),
        );
    }
    Ok(follows)
}

fn build_draggables(config: &ShowcaseConfig, surface: &dyn RenderSurface) -> Result<Vec<Draggable>> {
    let travel = |track: &str| {
        let width = surface
            .bounds(&ElementId::new(track))
            .map_or(0.0, |b| b.width());
        slider_travel(width, THUMB_WIDTH)
    };
    let tuning = config.drag.clone();
    Ok(vec![
        Draggable::new(
            ids::GLASS_SLIDER_THUMB,
            DragAxis::X {
                max: travel(ids::GLASS_SLIDER_TRACK),
            },
            tuning.clone(),
        )?
        .with_fill(ids::GLASS_SLIDER_FILL),
        Draggable::new(
            ids::LIQUID_SLIDER_THUMB,
            DragAxis::X {
                max: travel(ids::LIQUID_SLIDER_TRACK),
            },
            tuning.clone(),
        )?
        .with_morph(ids::LIQUID_SLIDER_THUMB),
        Draggable::new(ids::ROTARY_KNOB, tuning.knob_axis(), tuning.clone())?.with_inertia(),
        Draggable::new(ids::SQUEEZE_TRACK, DragAxis::X { max: SQUEEZE_TRAVEL }, tuning)?
            .with_inertia()
            .with_squeeze(ids::SQUEEZE_TRACK),
    ])
}
