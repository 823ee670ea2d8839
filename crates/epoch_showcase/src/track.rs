//! Looping timeline track
//!
//! The era sequence is repeated `copies` times so the track can scroll by one
//! copy's length and restart without a visible seam.

use crate::era::EraRecord;
use crate::error::{Result, ShowcaseError};
use epoch_animation::{Easing, MotionTarget};
use epoch_core::{ElementId, Property, RenderSurface, SurfaceResult};

/// Fewest copies that keep the wrap seamless
pub const MIN_COPIES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopTrack {
    record_count: usize,
    copies: usize,
}

impl LoopTrack {
    pub fn new(record_count: usize, copies: usize) -> Result<Self> {
        if record_count == 0 {
            return Err(ShowcaseError::EmptyEraTable);
        }
        if copies < MIN_COPIES {
            return Err(ShowcaseError::TooFewCopies(copies));
        }
        Ok(Self {
            record_count,
            copies,
        })
    }

    /// Number of displayed cards
    pub fn len(&self) -> usize {
        self.record_count * self.copies
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Record behind a displayed card, `None` past the end of the track
    pub fn original_index(&self, display_index: usize) -> Option<usize> {
        (display_index < self.len()).then_some(display_index % self.record_count)
    }

    /// Per-cycle translation as a fraction of the track length
    pub fn cycle_fraction(&self) -> f32 {
        -1.0 / self.copies as f32
    }

    pub fn card_id(display_index: usize) -> ElementId {
        ElementId::new(format!("timeline-card-{display_index}"))
    }

    /// Display index encoded in a card id
    pub fn parse_card_id(id: &ElementId) -> Option<usize> {
        id.as_str().strip_prefix("timeline-card-")?.parse().ok()
    }

    /// Append one card per display slot to `track`
    pub fn populate(
        &self,
        records: &[EraRecord],
        track: &ElementId,
        surface: &mut dyn RenderSurface,
    ) -> SurfaceResult<()> {
        for display in 0..self.len() {
            let record = &records[display % self.record_count];
            surface.append_child(track, Self::card_id(display), &record.card_label())?;
        }
        Ok(())
    }

    /// Endless linear scroll by exactly one copy of the sequence
    pub fn scroll_target(&self, track: ElementId, track_width: f32, duration_ms: f32) -> MotionTarget {
        MotionTarget::new(track, duration_ms)
            .from_to(Property::TranslateX, 0.0, track_width * self.cycle_fraction())
            .ease(Easing::Linear)
            .repeat_forever()
    }
}
