//! Motion targets
//!
//! A [`MotionTarget`] describes one request: animate a set of properties of
//! one element toward goal values over a duration with an easing curve.

use crate::easing::Easing;
use epoch_core::{ElementId, Property};
use smallvec::SmallVec;

/// Completion token delivered by the scheduler when a motion finishes.
///
/// Owners define their own cue constants and match on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cue(pub u32);

/// Goal for a single property
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyGoal {
    pub property: Property,
    pub to: f32,
    /// Explicit start value; applied immediately when the motion is issued
    pub from: Option<f32>,
}

/// How a motion repeats after its first pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    #[default]
    Once,
    /// Play back and forth, `n` extra passes (odd counts end at the start value)
    Yoyo(u32),
    /// Restart from the captured start value forever
    Forever,
}

impl Repeat {
    /// Total number of passes, `None` for infinite
    pub fn passes(self) -> Option<u32> {
        match self {
            Repeat::Once => Some(1),
            Repeat::Yoyo(n) => Some(n.saturating_add(1)),
            Repeat::Forever => None,
        }
    }
}

/// A request to animate properties of one element
#[derive(Clone, Debug, PartialEq)]
pub struct MotionTarget {
    pub element: ElementId,
    pub goals: SmallVec<[PropertyGoal; 4]>,
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub easing: Easing,
    pub repeat: Repeat,
    /// Delivered once when the motion completes (never when superseded)
    pub cue: Option<Cue>,
}

impl MotionTarget {
    pub fn new(element: impl Into<ElementId>, duration_ms: f32) -> Self {
        Self {
            element: element.into(),
            goals: SmallVec::new(),
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::Linear,
            repeat: Repeat::Once,
            cue: None,
        }
    }

    /// Animate `property` from its current value to `to`
    pub fn to(mut self, property: Property, to: f32) -> Self {
        self.set_goal(PropertyGoal {
            property,
            to,
            from: None,
        });
        self
    }

    /// Animate `property` from `from` to `to`
    pub fn from_to(mut self, property: Property, from: f32, to: f32) -> Self {
        self.set_goal(PropertyGoal {
            property,
            to,
            from: Some(from),
        });
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Play forward then back `extra_passes` times
    pub fn yoyo(mut self, extra_passes: u32) -> Self {
        self.repeat = Repeat::Yoyo(extra_passes);
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    pub fn on_complete(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.goals.iter().map(|g| g.property)
    }

    /// Goal value for `property`, if present
    pub fn goal(&self, property: Property) -> Option<f32> {
        self.goals
            .iter()
            .find(|g| g.property == property)
            .map(|g| g.to)
    }

    /// Wall time until the last pass ends, `None` when repeating forever
    pub fn total_ms(&self) -> Option<f32> {
        self.repeat
            .passes()
            .map(|passes| self.delay_ms + self.duration_ms * passes as f32)
    }

    // A later goal for the same property replaces the earlier one
    fn set_goal(&mut self, goal: PropertyGoal) {
        match self.goals.iter_mut().find(|g| g.property == goal.property) {
            Some(existing) => *existing = goal,
            None => self.goals.push(goal),
        }
    }
}
