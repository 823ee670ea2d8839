//! Scenario runner that drives a headless showcase at a fixed frame step.

use crate::report::RunReport;
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::Result;
use epoch_core::events::event_types;
use epoch_core::{ElementId, Event, EventType, KeyCode, Point, RenderSurface, SceneSurface};
use epoch_showcase::{build_scene, Showcase, ShowcaseConfig};

/// Frame step of the headless clock
pub const FRAME_MS: u64 = 16;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: RunReport },
    Failed { report: RunReport },
}

impl RunOutcome {
    pub fn report(&self) -> &RunReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Frame clock shared by every step of one run
#[derive(Debug, Default, Clone, Copy)]
struct Clock {
    frames: u64,
    ms: u64,
}

impl Clock {
    fn advance(&mut self, showcase: &mut Showcase<SceneSurface>, step_ms: u64) {
        let completions = showcase.tick(step_ms as f32);
        self.frames = self.frames.saturating_add(1);
        self.ms = self.ms.saturating_add(step_ms);
        if !completions.is_empty() {
            tracing::trace!(frame = self.frames, completions = completions.len(), "motions finished");
        }
    }
}

/// Execute a pre-loaded scenario against a fresh showcase built from `config`.
pub fn run_loaded_scenario(scenario: &Scenario, config: &ShowcaseConfig) -> Result<RunOutcome> {
    let mut showcase = Showcase::new(build_scene(config), config)?;
    let mut clock = Clock::default();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        if let Some(assertion) = step.assertion_name() {
            if let Some(message) = check(step, &showcase) {
                tracing::info!(step_index, assertion, %message, "assertion failed");
                let report = RunReport::failed(assertion, step_index, message, clock.frames, clock.ms)
                    .with_scenario(scenario.name.clone());
                return Ok(RunOutcome::Failed { report });
            }
            continue;
        }

        match step {
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                for _ in 0..wait_frames(*ms, FRAME_MS) {
                    let step_ms = remaining.min(FRAME_MS);
                    remaining = remaining.saturating_sub(step_ms);
                    clock.advance(&mut showcase, step_ms);
                }
            }
            ScenarioStep::Tick { frames } => {
                for _ in 0..*frames {
                    clock.advance(&mut showcase, FRAME_MS);
                }
            }
            _ => {
                if let Some(event) = input_event(step, clock.ms) {
                    let handled = showcase.handle(&event);
                    tracing::debug!(step_index, event_type = event.event_type, element = %event.target, handled, "input");
                } else if let ScenarioStep::SelectCard { index } = step {
                    if !showcase.select_card(*index) {
                        tracing::debug!(step_index, index, "card selection ignored");
                    }
                }
            }
        }
    }

    Ok(RunOutcome::Passed {
        report: RunReport::passed(clock.frames, clock.ms).with_scenario(scenario.name.clone()),
    })
}

fn pointer(event_type: EventType, target: &str, x: f32, y: f32, at_ms: u64) -> Event {
    Event::pointer(event_type, ElementId::new(target), Point::new(x, y), at_ms)
}

fn drag(event_type: EventType, target: &str, delta: f32, at_ms: u64) -> Event {
    Event::drag(event_type, ElementId::new(target), delta, at_ms)
}

/// Translate an input step into the event the surface would deliver
fn input_event(step: &ScenarioStep, at_ms: u64) -> Option<Event> {
    let event = match step {
        ScenarioStep::PointerMove { target, x, y } => {
            pointer(event_types::POINTER_MOVE, target, *x, *y, at_ms)
        }
        ScenarioStep::PointerEnter { target, x, y } => {
            pointer(event_types::POINTER_ENTER, target, *x, *y, at_ms)
        }
        ScenarioStep::PointerLeave { target, x, y } => {
            pointer(event_types::POINTER_LEAVE, target, *x, *y, at_ms)
        }
        ScenarioStep::Click { target } => Event::click(ElementId::new(target), at_ms),
        ScenarioStep::Key { key } => {
            let code = KeyCode::from_name(key);
            if code == KeyCode::UNKNOWN {
                tracing::warn!(%key, "unknown key name");
            }
            Event::key_down(code, at_ms)
        }
        ScenarioStep::DragStart { target } => drag(event_types::DRAG_START, target, 0.0, at_ms),
        ScenarioStep::DragMove { target, delta } => drag(event_types::DRAG, target, *delta, at_ms),
        ScenarioStep::DragEnd { target } => drag(event_types::DRAG_END, target, 0.0, at_ms),
        _ => return None,
    };
    Some(event)
}

/// Evaluate an assertion step; `Some(message)` on failure
fn check(step: &ScenarioStep, showcase: &Showcase<SceneSurface>) -> Option<String> {
    let surface = showcase.surface();
    let missing = |id: &str| format!("element '{id}' not found");

    match step {
        ScenarioStep::AssertPhase { phase } => {
            let actual = showcase.phase();
            (actual != *phase).then(|| format!("expected phase {phase:?}, found {actual:?}"))
        }
        ScenarioStep::AssertProperty {
            id,
            property,
            value,
            tolerance,
        } => {
            let element = ElementId::new(id.as_str());
            if !surface.exists(&element) {
                return Some(missing(id));
            }
            let actual = surface.property_or_rest(&element, *property);
            ((actual - value).abs() > *tolerance).then(|| {
                format!(
                    "expected {id}.{} = {value} (±{tolerance}), found {actual}",
                    property.name()
                )
            })
        }
        ScenarioStep::AssertClass { id, value } => {
            let element = ElementId::new(id.as_str());
            if !surface.exists(&element) {
                return Some(missing(id));
            }
            let class = surface.class(&element).unwrap_or_default();
            (!class.split_whitespace().any(|token| token == value.as_str()))
                .then(|| format!("expected {id} to have class '{value}', found '{class}'"))
        }
        ScenarioStep::AssertPointerEvents { id, enabled } => {
            let element = ElementId::new(id.as_str());
            if !surface.exists(&element) {
                return Some(missing(id));
            }
            let actual = surface.pointer_events(&element).unwrap_or(true);
            (actual != *enabled)
                .then(|| format!("expected pointer events on {id} = {enabled}, found {actual}"))
        }
        _ => None,
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}
