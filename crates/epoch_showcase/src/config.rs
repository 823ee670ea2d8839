//! Showcase configuration (epoch.toml)

use crate::era::{builtin_eras, EraRecord};
use crate::error::{Result, ShowcaseError};
use crate::track::MIN_COPIES;
use epoch_interact::DragTuning;
use serde::{Deserialize, Serialize};

/// Top-level showcase configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub drag: DragTuning,
    /// Replaces the built-in era table when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eras: Vec<EraRecord>,
}

/// Looping timeline track
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// How many times the era sequence is repeated on the track
    #[serde(default = "default_copies")]
    pub copies: usize,
    /// Time to scroll by one copy
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: f32,
}

fn default_copies() -> usize {
    MIN_COPIES
}

fn default_scroll_duration() -> f32 {
    20_000.0
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            copies: default_copies(),
            scroll_duration_ms: default_scroll_duration(),
        }
    }
}

/// Modal open/close choreography
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalConfig {
    #[serde(default = "default_overlay_fade")]
    pub overlay_fade_ms: f32,
    /// Content entrance waits this long after the overlay starts
    #[serde(default = "default_content_delay")]
    pub content_delay_ms: f32,
    #[serde(default = "default_content_duration")]
    pub content_duration_ms: f32,
    /// Back-out overshoot of the content entrance
    #[serde(default = "default_content_overshoot")]
    pub content_overshoot: f32,
    /// Vertical offset of the content while hidden
    #[serde(default = "default_closed_offset")]
    pub closed_offset_y: f32,
    #[serde(default = "default_slot_delay")]
    pub slot_delay_ms: f32,
    #[serde(default = "default_slot_stagger")]
    pub slot_stagger_ms: f32,
    #[serde(default = "default_slot_duration")]
    pub slot_duration_ms: f32,
    #[serde(default = "default_slot_offset")]
    pub slot_offset_y: f32,
    #[serde(default = "default_close_duration")]
    pub close_duration_ms: f32,
    /// Overlay fade-out trails the content by this much
    #[serde(default = "default_overlay_close_delay")]
    pub overlay_close_delay_ms: f32,
    /// Hybrid surface tilt limit
    #[serde(default = "default_tilt_max")]
    pub tilt_max_degrees: f32,
}

fn default_overlay_fade() -> f32 {
    300.0
}

fn default_content_delay() -> f32 {
    100.0
}

fn default_content_duration() -> f32 {
    400.0
}

fn default_content_overshoot() -> f32 {
    1.2
}

fn default_closed_offset() -> f32 {
    50.0
}

fn default_slot_delay() -> f32 {
    300.0
}

fn default_slot_stagger() -> f32 {
    80.0
}

fn default_slot_duration() -> f32 {
    400.0
}

fn default_slot_offset() -> f32 {
    15.0
}

fn default_close_duration() -> f32 {
    300.0
}

fn default_overlay_close_delay() -> f32 {
    100.0
}

fn default_tilt_max() -> f32 {
    5.0
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            overlay_fade_ms: default_overlay_fade(),
            content_delay_ms: default_content_delay(),
            content_duration_ms: default_content_duration(),
            content_overshoot: default_content_overshoot(),
            closed_offset_y: default_closed_offset(),
            slot_delay_ms: default_slot_delay(),
            slot_stagger_ms: default_slot_stagger(),
            slot_duration_ms: default_slot_duration(),
            slot_offset_y: default_slot_offset(),
            close_duration_ms: default_close_duration(),
            overlay_close_delay_ms: default_overlay_close_delay(),
            tilt_max_degrees: default_tilt_max(),
        }
    }
}

/// Cursor overlay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default = "default_trail")]
    pub trail_ms: f32,
}

fn default_trail() -> f32 {
    500.0
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            trail_ms: default_trail(),
        }
    }
}

impl ShowcaseConfig {
    /// Configured era table, or the built-in one
    pub fn eras(&self) -> Vec<EraRecord> {
        if self.eras.is_empty() {
            builtin_eras()
        } else {
            self.eras.clone()
        }
    }

    /// Check every value before the showcase is built
    pub fn validate(&self) -> Result<()> {
        if self.timeline.copies < MIN_COPIES {
            return Err(ShowcaseError::TooFewCopies(self.timeline.copies));
        }
        let m = &self.modal;
        let durations = [
            ("timeline.scroll_duration_ms", self.timeline.scroll_duration_ms),
            ("modal.overlay_fade_ms", m.overlay_fade_ms),
            ("modal.content_delay_ms", m.content_delay_ms),
            ("modal.content_duration_ms", m.content_duration_ms),
            ("modal.slot_delay_ms", m.slot_delay_ms),
            ("modal.slot_stagger_ms", m.slot_stagger_ms),
            ("modal.slot_duration_ms", m.slot_duration_ms),
            ("modal.close_duration_ms", m.close_duration_ms),
            ("modal.overlay_close_delay_ms", m.overlay_close_delay_ms),
            ("cursor.trail_ms", self.cursor.trail_ms),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ShowcaseError::Config(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if self.timeline.scroll_duration_ms <= 0.0 {
            return Err(ShowcaseError::Config("timeline.scroll_duration_ms must be positive".to_string()));
        }
        if !(m.tilt_max_degrees.is_finite() && m.tilt_max_degrees > 0.0) {
            return Err(ShowcaseError::Config(format!(
                "modal.tilt_max_degrees must be positive, got {}",
                m.tilt_max_degrees
            )));
        }
        self.drag.validate()?;
        Ok(())
    }
}
