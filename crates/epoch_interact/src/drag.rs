//! Draggable behavior with release inertia
//!
//! A handle is bound either to a bounded horizontal axis `[0, max]` or to a
//! bounded rotation `[min°, max°]`. The lifecycle is a small state machine:
//!
//! ```text
//! Idle --Grab--> Dragging --Release--> Releasing --Settle--> Idle
//!                    ^                     |
//!                    +-------Grab----------+
//! ```
//!
//! While dragging, every move updates the position (always clamped), the
//! velocity estimate, an optional fill indicator, and an optional squeeze
//! effect on sibling items. On release the handle coasts toward
//! `position + velocity * time_constant` (clamped) and the behavior returns
//! to `Idle` once the coast has finished.

use crate::error::{InteractError, Result};
use crate::issue;
use epoch_animation::{Easing, MotionHandle, MotionPreset, MotionScheduler, MotionTarget};
use epoch_core::{ElementId, Property, RenderSurface, StateMachine};
use serde::{Deserialize, Serialize};

/// Nominal frame length used when move events carry no usable timestamps
const FRAME_MS: f32 = 16.0;

/// Below this speed (units per ms) a release does not coast
const MIN_COAST_VELOCITY: f32 = 0.01;

/// Squeeze per unit of per-frame movement
const SQUEEZE_PER_UNIT: f32 = 0.005;
/// Skew degrees per unit of per-frame movement (leans against the motion)
const SKEW_PER_UNIT: f32 = -0.2;

/// Drag lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// Coasting after release
    Releasing,
}

/// Drag lifecycle input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragInput {
    Grab,
    Release,
    Settle,
}

fn drag_machine() -> StateMachine<DragPhase, DragInput> {
    StateMachine::builder(DragPhase::Idle)
        .on(DragPhase::Idle, DragInput::Grab, DragPhase::Dragging)
        .on(DragPhase::Releasing, DragInput::Grab, DragPhase::Dragging)
        .on(DragPhase::Dragging, DragInput::Release, DragPhase::Releasing)
        .on(DragPhase::Releasing, DragInput::Settle, DragPhase::Idle)
        .build()
}

/// Axis a handle moves along
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAxis {
    /// Horizontal translation in `[0, max]` pixels
    X { max: f32 },
    /// Rotation in `[min, max]` degrees
    Rotation { min: f32, max: f32 },
}

impl DragAxis {
    pub fn bounds(&self) -> (f32, f32) {
        match *self {
            DragAxis::X { max } => (0.0, max),
            DragAxis::Rotation { min, max } => (min, max),
        }
    }

    /// Property the handle's position is written to
    pub fn property(&self) -> Property {
        match self {
            DragAxis::X { .. } => Property::TranslateX,
            DragAxis::Rotation { .. } => Property::Rotate,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        let (min, max) = self.bounds();
        value.clamp(min, max)
    }

    /// Position mapped onto `[0, 1]` across the bounds
    pub fn normalize(&self, value: f32) -> f32 {
        let (min, max) = self.bounds();
        (self.clamp(value) - min) / (max - min)
    }

    fn validate(&self) -> Result<()> {
        let (min, max) = self.bounds();
        if min.is_finite() && max.is_finite() && min < max {
            Ok(())
        } else {
            Err(InteractError::InvalidBounds { min, max })
        }
    }
}

fn default_time_constant() -> f32 {
    325.0
}

fn default_coast_duration() -> f32 {
    800.0
}

fn default_smoothing() -> f32 {
    0.8
}

fn default_max_skew() -> f32 {
    30.0
}

fn default_min_squeeze() -> f32 {
    0.6
}

fn default_knob_min() -> f32 {
    -135.0
}

fn default_knob_max() -> f32 {
    135.0
}

/// Drag tuning shared by every draggable
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragTuning {
    /// Inertia projection: distance = velocity × time constant
    #[serde(default = "default_time_constant")]
    pub inertia_time_constant_ms: f32,

    #[serde(default = "default_coast_duration")]
    pub coast_duration_ms: f32,

    /// Weight of the newest sample in the velocity estimate
    #[serde(default = "default_smoothing")]
    pub velocity_smoothing: f32,

    #[serde(default = "default_max_skew")]
    pub max_skew_degrees: f32,

    /// Narrowest horizontal scale a squeezed item may reach
    #[serde(default = "default_min_squeeze")]
    pub min_squeeze_scale: f32,

    #[serde(default = "default_knob_min")]
    pub knob_min_degrees: f32,

    #[serde(default = "default_knob_max")]
    pub knob_max_degrees: f32,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            inertia_time_constant_ms: default_time_constant(),
            coast_duration_ms: default_coast_duration(),
            velocity_smoothing: default_smoothing(),
            max_skew_degrees: default_max_skew(),
            min_squeeze_scale: default_min_squeeze(),
            knob_min_degrees: default_knob_min(),
            knob_max_degrees: default_knob_max(),
        }
    }
}

impl DragTuning {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (
                "inertia time constant",
                self.inertia_time_constant_ms,
                self.inertia_time_constant_ms >= 0.0,
            ),
            (
                "coast duration",
                self.coast_duration_ms,
                self.coast_duration_ms > 0.0,
            ),
            (
                "velocity smoothing",
                self.velocity_smoothing,
                self.velocity_smoothing > 0.0 && self.velocity_smoothing <= 1.0,
            ),
            (
                "max skew",
                self.max_skew_degrees,
                self.max_skew_degrees > 0.0 && self.max_skew_degrees < 90.0,
            ),
            (
                "min squeeze scale",
                self.min_squeeze_scale,
                self.min_squeeze_scale > 0.0 && self.min_squeeze_scale <= 1.0,
            ),
        ];
        for (name, value, ok) in checks {
            if !(value.is_finite() && ok) {
                return Err(InteractError::InvalidTuning { name, value });
            }
        }
        DragAxis::Rotation {
            min: self.knob_min_degrees,
            max: self.knob_max_degrees,
        }
        .validate()
    }

    /// Rotation axis for knobs
    pub fn knob_axis(&self) -> DragAxis {
        DragAxis::Rotation {
            min: self.knob_min_degrees,
            max: self.knob_max_degrees,
        }
    }
}

/// Exponentially smoothed velocity over recent move events (units per ms)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityTracker {
    smoothing: f32,
    velocity: f32,
    last_ms: Option<u64>,
}

impl VelocityTracker {
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothing: smoothing.clamp(f32::EPSILON, 1.0),
            velocity: 0.0,
            last_ms: None,
        }
    }

    pub fn reset(&mut self, timestamp_ms: u64) {
        self.velocity = 0.0;
        self.last_ms = Some(timestamp_ms);
    }

    /// Record a move of `delta` at `timestamp_ms`; returns the new estimate
    pub fn push(&mut self, delta: f32, timestamp_ms: u64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if timestamp_ms > last => (timestamp_ms - last) as f32,
            _ => FRAME_MS,
        };
        self.last_ms = Some(timestamp_ms);
        let instant = delta / dt;
        self.velocity = self.smoothing * instant + (1.0 - self.smoothing) * self.velocity;
        self.velocity
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

/// Squeeze and skew for sibling items, derived from drag velocity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqueezeSignal {
    /// Horizontal scale, in `[min_squeeze_scale, 1]`
    pub scale_x: f32,
    /// Skew in degrees, in `[-max_skew, max_skew]`
    pub skew: f32,
}

impl SqueezeSignal {
    pub fn from_velocity(velocity: f32, tuning: &DragTuning) -> Self {
        let per_frame = if velocity.is_finite() {
            velocity * FRAME_MS
        } else {
            0.0
        };
        let max_skew = tuning.max_skew_degrees;
        Self {
            scale_x: (1.0 - per_frame.abs() * SQUEEZE_PER_UNIT).clamp(tuning.min_squeeze_scale, 1.0),
            skew: (per_frame * SKEW_PER_UNIT).clamp(-max_skew, max_skew),
        }
    }
}

/// Per-move output of a drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSignal {
    pub position: f32,
    pub normalized: f32,
    pub velocity: f32,
    pub squeeze: Option<SqueezeSignal>,
}

/// State of one drag gesture, from grab to release
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub axis: DragAxis,
    pub start_position: f32,
    pub position: f32,
    pub velocity: f32,
}

/// A bounded draggable handle
#[derive(Clone, Debug)]
pub struct Draggable {
    handle: ElementId,
    axis: DragAxis,
    tuning: DragTuning,
    inertia: bool,
    machine: StateMachine<DragPhase, DragInput>,
    session: Option<DragSession>,
    position: f32,
    tracker: VelocityTracker,
    coast: Option<MotionHandle>,
    fill: Option<ElementId>,
    squeeze: Option<ElementId>,
    morph: Option<ElementId>,
}

impl Draggable {
    pub fn new(handle: impl Into<ElementId>, axis: DragAxis, tuning: DragTuning) -> Result<Self> {
        axis.validate()?;
        tuning.validate()?;
        Ok(Self {
            handle: handle.into(),
            axis,
            tuning,
            inertia: false,
            machine: drag_machine(),
            session: None,
            position: axis.clamp(0.0),
            tracker: VelocityTracker::new(tuning.velocity_smoothing),
            coast: None,
            fill: None,
            squeeze: None,
            morph: None,
        })
    }

    /// Coast after release
    pub fn with_inertia(mut self) -> Self {
        self.inertia = true;
        self
    }

    /// Drive `element`'s width percentage from the normalized position
    pub fn with_fill(mut self, element: impl Into<ElementId>) -> Self {
        self.fill = Some(element.into());
        self
    }

    /// Squeeze and skew the children of `container` with drag velocity
    pub fn with_squeeze(mut self, container: impl Into<ElementId>) -> Self {
        self.squeeze = Some(container.into());
        self
    }

    /// Deform `element` into a droplet while dragging
    pub fn with_morph(mut self, element: impl Into<ElementId>) -> Self {
        self.morph = Some(element.into());
        self
    }

    pub fn handle(&self) -> &ElementId {
        &self.handle
    }

    pub fn axis(&self) -> DragAxis {
        self.axis
    }

    pub fn phase(&self) -> DragPhase {
        self.machine.current_state()
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.tracker.velocity()
    }

    /// Position across the bounds, in `[0, 1]`
    pub fn normalized_position(&self) -> f32 {
        self.axis.normalize(self.position)
    }

    /// The active gesture, if dragging
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a gesture. Grabbing during a coast stops the coast where it is.
    pub fn on_grab(
        &mut self,
        timestamp_ms: u64,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if !surface.exists(&self.handle) {
            tracing::debug!(handle = %self.handle, "drag handle missing");
            return false;
        }
        if self.machine.is_in(DragPhase::Releasing) {
            if let Some(coast) = self.coast.take() {
                engine.cancel(coast);
            }
            self.read_position(engine);
        }
        if self.machine.send(DragInput::Grab).is_none() {
            return false;
        }

        self.tracker.reset(timestamp_ms);
        self.session = Some(DragSession {
            axis: self.axis,
            start_position: self.position,
            position: self.position,
            velocity: 0.0,
        });
        if let Some(morph) = self.morph.clone() {
            issue(
                engine,
                MotionTarget::new(morph, 200.0)
                    .to(Property::Scale, 1.2)
                    .to(Property::Morph, 1.0),
                surface,
            );
        }
        tracing::debug!(handle = %self.handle, position = self.position, "drag started");
        true
    }

    /// Apply a move of `delta` along the axis
    pub fn on_drag(
        &mut self,
        delta: f32,
        timestamp_ms: u64,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> Option<DragSignal> {
        if !self.machine.is_in(DragPhase::Dragging) || !delta.is_finite() {
            return None;
        }
        let velocity = self.tracker.push(delta, timestamp_ms);
        self.position = self.axis.clamp(self.position + delta);
        if let Err(err) = engine.set(&self.handle, self.axis.property(), self.position, surface) {
            tracing::debug!(%err, "drag handle write skipped");
        }
        self.write_fill(engine, surface);

        let squeeze = self.squeeze.clone().map(|container| {
            let signal = SqueezeSignal::from_velocity(velocity, &self.tuning);
            for item in surface.children(&container) {
                issue(
                    engine,
                    MotionTarget::new(item.id, 100.0)
                        .to(Property::ScaleX, signal.scale_x)
                        .to(Property::SkewX, signal.skew),
                    surface,
                );
            }
            signal
        });

        if let Some(session) = self.session.as_mut() {
            session.position = self.position;
            session.velocity = velocity;
        }
        Some(DragSignal {
            position: self.position,
            normalized: self.normalized_position(),
            velocity,
            squeeze,
        })
    }

    /// End the gesture, coasting if inertia is enabled and the handle is moving
    pub fn on_release(
        &mut self,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if self.machine.send(DragInput::Release).is_none() {
            return false;
        }
        let session = self.session.take();
        let velocity = self.tracker.velocity();

        if let Some(morph) = self.morph.clone() {
            issue(
                engine,
                MotionPreset::rest(
                    morph,
                    &[Property::Scale, Property::Morph],
                    400.0,
                    Easing::elastic(1.0, 0.5),
                ),
                surface,
            );
        }
        if let Some(container) = self.squeeze.clone() {
            for item in surface.children(&container) {
                issue(
                    engine,
                    MotionPreset::rest(
                        item.id,
                        &[Property::ScaleX, Property::SkewX],
                        500.0,
                        Easing::elastic(1.0, 0.3),
                    ),
                    surface,
                );
            }
        }

        if self.inertia && velocity.abs() > MIN_COAST_VELOCITY {
            let resting = self
                .axis
                .clamp(self.position + velocity * self.tuning.inertia_time_constant_ms);
            self.coast = issue(
                engine,
                MotionTarget::new(self.handle.clone(), self.tuning.coast_duration_ms)
                    .to(self.axis.property(), resting)
                    .ease(Easing::EaseOutExpo),
                surface,
            );
        }
        tracing::debug!(
            handle = %self.handle,
            from = session.map(|s| s.start_position),
            position = self.position,
            velocity,
            "drag released"
        );
        if self.coast.is_none() {
            self.machine.send(DragInput::Settle);
        }
        true
    }

    /// Follow the coast after a frame; settles to `Idle` when it has finished
    pub fn sync(&mut self, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
        if !self.machine.is_in(DragPhase::Releasing) {
            return;
        }
        self.read_position(engine);
        self.write_fill(engine, surface);
        if !self.coast.is_some_and(|coast| engine.is_active(coast)) {
            self.coast = None;
            self.machine.send(DragInput::Settle);
            tracing::trace!(handle = %self.handle, position = self.position, "drag settled");
        }
    }

    fn read_position(&mut self, engine: &MotionScheduler) {
        if let Some(value) = engine.value(&self.handle, self.axis.property()) {
            self.position = self.axis.clamp(value);
        }
    }

    fn write_fill(&self, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
        let Some(fill) = self.fill.as_ref() else {
            return;
        };
        let percent = self.normalized_position() * 100.0;
        if let Err(err) = engine.set(fill, Property::WidthPercent, percent, surface) {
            tracing::debug!(%err, "fill indicator skipped");
        }
    }
}
