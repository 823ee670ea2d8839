//! Pointer follow behavior
//!
//! A reference frame drives one or more layers. While the pointer is inside
//! the frame every move retargets each layer toward an offset derived from
//! the pointer position; when the pointer leaves, every layer springs back to
//! rest with an overshooting easing.

use crate::error::{InteractError, Result};
use crate::issue;
use epoch_animation::{Easing, MotionPreset, MotionScheduler, MotionTarget};
use epoch_core::{ElementId, Point, Property, Rect, RenderSurface};
use smallvec::SmallVec;

/// How a layer reacts to the pointer offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowMode {
    /// Offset scaled down by `factor` in (0, 1]
    Damped { factor: f32 },
    /// Offset scaled by a signed multiplier (negative moves against the pointer)
    Parallax { multiplier: f32 },
    /// Normalized offset mapped to rotation about both axes, clamped to ±`max_degrees`
    Tilt { max_degrees: f32 },
}

impl FollowMode {
    fn properties(&self, stretch: bool) -> SmallVec<[Property; 4]> {
        match self {
            FollowMode::Damped { .. } | FollowMode::Parallax { .. } => {
                let mut props = SmallVec::from_slice(&[Property::TranslateX, Property::TranslateY]);
                if stretch {
                    props.extend([Property::ScaleX, Property::ScaleY]);
                }
                props
            }
            FollowMode::Tilt { .. } => SmallVec::from_slice(&[Property::RotateX, Property::RotateY]),
        }
    }
}

/// Reference point the offset is measured from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
}

/// One element driven by a frame
#[derive(Clone, Debug, PartialEq)]
pub struct FollowLayer {
    pub element: ElementId,
    pub mode: FollowMode,
    pub anchor: Anchor,
    pub duration_ms: f32,
    pub easing: Easing,
    /// Extra scale per pixel of offset, per axis
    pub stretch: Option<f32>,
}

impl FollowLayer {
    pub fn damped(element: impl Into<ElementId>, factor: f32) -> Self {
        Self::with_mode(element, FollowMode::Damped { factor })
    }

    pub fn parallax(element: impl Into<ElementId>, multiplier: f32) -> Self {
        Self::with_mode(element, FollowMode::Parallax { multiplier })
    }

    pub fn tilt(element: impl Into<ElementId>, max_degrees: f32) -> Self {
        Self::with_mode(element, FollowMode::Tilt { max_degrees })
            .anchor(Anchor::TopLeft)
            .duration(500.0)
            .ease(Easing::EaseOutQuad)
    }

    fn with_mode(element: impl Into<ElementId>, mode: FollowMode) -> Self {
        Self {
            element: element.into(),
            mode,
            anchor: Anchor::Center,
            duration_ms: 200.0,
            easing: Easing::EaseOutQuad,
            stretch: None,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn stretch(mut self, per_pixel: f32) -> Self {
        self.stretch = Some(per_pixel);
        self
    }

    fn validate(&self) -> Result<()> {
        match self.mode {
            FollowMode::Damped { factor } if !(factor > 0.0 && factor <= 1.0) => {
                Err(InteractError::InvalidFactor(factor))
            }
            FollowMode::Parallax { multiplier } if !multiplier.is_finite() => {
                Err(InteractError::InvalidTuning {
                    name: "parallax multiplier",
                    value: multiplier,
                })
            }
            FollowMode::Tilt { max_degrees } if !(max_degrees.is_finite() && max_degrees > 0.0) => {
                Err(InteractError::InvalidTuning {
                    name: "tilt limit",
                    value: max_degrees,
                })
            }
            _ if !(self.duration_ms.is_finite() && self.duration_ms >= 0.0) => {
                Err(InteractError::InvalidTuning {
                    name: "follow duration",
                    value: self.duration_ms,
                })
            }
            _ => Ok(()),
        }
    }

    /// Property goals for a pointer inside `frame`
    pub fn goals(&self, pointer: Point, frame: Rect) -> SmallVec<[(Property, f32); 4]> {
        let mut goals = SmallVec::new();
        match self.mode {
            FollowMode::Damped { factor: k } | FollowMode::Parallax { multiplier: k } => {
                let origin = match self.anchor {
                    Anchor::Center => frame.center(),
                    Anchor::TopLeft => frame.origin,
                };
                let offset = pointer.offset_from(origin);
                goals.push((Property::TranslateX, offset.x * k));
                goals.push((Property::TranslateY, offset.y * k));
                if let Some(per_pixel) = self.stretch {
                    goals.push((Property::ScaleX, 1.0 + offset.x.abs() * per_pixel));
                    goals.push((Property::ScaleY, 1.0 + offset.y.abs() * per_pixel));
                }
            }
            FollowMode::Tilt { max_degrees } => {
                // Normalize to [-0.5, 0.5] across the frame regardless of anchor
                let local = pointer.offset_from(frame.origin);
                let nx = if frame.width() > 0.0 { local.x / frame.width() - 0.5 } else { 0.0 };
                let ny = if frame.height() > 0.0 { local.y / frame.height() - 0.5 } else { 0.0 };
                let limit = max_degrees.abs();
                goals.push((Property::RotateY, (nx * 2.0 * max_degrees).clamp(-limit, limit)));
                goals.push((Property::RotateX, (-ny * 2.0 * max_degrees).clamp(-limit, limit)));
            }
        }
        goals
    }

    fn rest_properties(&self) -> SmallVec<[Property; 4]> {
        self.mode.properties(self.stretch.is_some())
    }
}

/// Pointer-driven follow for all layers of one reference frame
#[derive(Clone, Debug)]
pub struct PointerFollow {
    frame: ElementId,
    layers: Vec<FollowLayer>,
    return_ms: f32,
    return_easing: Easing,
    inside: bool,
}

impl PointerFollow {
    pub fn new(frame: impl Into<ElementId>) -> Self {
        Self {
            frame: frame.into(),
            layers: Vec::new(),
            return_ms: 800.0,
            return_easing: Easing::elastic(1.0, 0.3),
            inside: false,
        }
    }

    /// Add a layer driven by this frame
    pub fn layer(mut self, layer: FollowLayer) -> Result<Self> {
        layer.validate()?;
        self.layers.push(layer);
        Ok(self)
    }

    /// Return-to-rest timing used on exit
    pub fn on_exit(mut self, duration_ms: f32, easing: Easing) -> Self {
        self.return_ms = duration_ms;
        self.return_easing = easing;
        self
    }

    pub fn frame(&self) -> &ElementId {
        &self.frame
    }

    pub fn layers(&self) -> &[FollowLayer] {
        &self.layers
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Retarget every layer toward the pointer. Moving outside the frame
    /// counts as an exit.
    pub fn on_move(
        &mut self,
        pointer: Point,
        engine: &mut MotionScheduler,
        surface: &mut dyn RenderSurface,
    ) {
        let Some(frame) = surface.bounds(&self.frame) else {
            tracing::debug!(frame = %self.frame, "pointer follow frame detached");
            return;
        };
        if !frame.contains(pointer) {
            if self.inside {
                self.on_leave(engine, surface);
            }
            return;
        }
        self.inside = true;

        for layer in &self.layers {
            let target = layer
                .goals(pointer, frame)
                .into_iter()
                .fold(
                    MotionTarget::new(layer.element.clone(), layer.duration_ms),
                    |target, (property, value)| target.to(property, value),
                )
                .ease(layer.easing);
            issue(engine, target, surface);
        }
    }

    /// Spring every layer back to rest
    pub fn on_leave(&mut self, engine: &mut MotionScheduler, surface: &mut dyn RenderSurface) {
        if !surface.exists(&self.frame) {
            tracing::debug!(frame = %self.frame, "pointer follow frame detached");
            return;
        }
        self.inside = false;
        for layer in &self.layers {
            let target = MotionPreset::rest(
                layer.element.clone(),
                &layer.rest_properties(),
                self.return_ms,
                self.return_easing,
            );
            issue(engine, target, surface);
        }
    }
}
