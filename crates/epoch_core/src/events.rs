//! Input events and routing
//!
//! The rendering surface reports input as [`Event`]s addressed to an element.
//! Components bind their interactive elements in an [`EventRouter`], which
//! resolves an incoming event to the actions registered for it.

use crate::element::ElementId;
use crate::geometry::Point;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Drag started on a draggable handle
    pub const DRAG_START: EventType = 6;
    /// Drag moved (axis-appropriate delta in [`EventData::Drag`](super::EventData))
    pub const DRAG: EventType = 7;
    /// Drag ended (pointer up after drag)
    pub const DRAG_END: EventType = 8;
    /// Primary button click
    pub const CLICK: EventType = 9;
    pub const KEY_DOWN: EventType = 20;
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Element the surface reports as the event target
    pub target: ElementId,
    pub data: EventData,
    /// Milliseconds on the frame clock
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    /// Drag delta along the handle's axis (pixels or degrees)
    Drag { delta: f32 },
    Key { key: KeyCode },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: ElementId, data: EventData, timestamp: u64) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
        }
    }

    pub fn pointer(event_type: EventType, target: ElementId, at: Point, timestamp: u64) -> Self {
        Self::new(
            event_type,
            target,
            EventData::Pointer { x: at.x, y: at.y },
            timestamp,
        )
    }

    pub fn click(target: ElementId, timestamp: u64) -> Self {
        Self::new(event_types::CLICK, target, EventData::None, timestamp)
    }

    pub fn key_down(key: KeyCode, timestamp: u64) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            ElementId::new("document"),
            EventData::Key { key },
            timestamp,
        )
    }

    pub fn drag(event_type: EventType, target: ElementId, delta: f32, timestamp: u64) -> Self {
        Self::new(event_type, target, EventData::Drag { delta }, timestamp)
    }

    /// Pointer position, if this is a pointer event
    pub fn position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const RIGHT: KeyCode = KeyCode(0x27);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Map a key name ("Escape", "Enter", ...) to a code
    pub fn from_name(name: &str) -> KeyCode {
        match name {
            "Escape" | "Esc" => KeyCode::ESCAPE,
            "Enter" => KeyCode::ENTER,
            " " | "Space" => KeyCode::SPACE,
            "ArrowLeft" => KeyCode::LEFT,
            "ArrowRight" => KeyCode::RIGHT,
            _ => KeyCode::UNKNOWN,
        }
    }
}

/// Maps (element, event type) pairs to caller-defined actions.
///
/// Bindings are plain data so a component can rebuild them wholesale when
/// the content they point at is replaced.
#[derive(Debug, Clone)]
pub struct EventRouter<A> {
    bindings: FxHashMap<(ElementId, EventType), SmallVec<[A; 1]>>,
}

impl<A: Clone> EventRouter<A> {
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Register an action for an element and event type
    pub fn bind(&mut self, element: ElementId, event_type: EventType, action: A) {
        self.bindings
            .entry((element, event_type))
            .or_default()
            .push(action);
    }

    /// Actions registered for the event's target and type
    pub fn route(&self, event: &Event) -> SmallVec<[A; 1]> {
        self.bindings
            .get(&(event.target.clone(), event.event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_bound(&self, element: &ElementId, event_type: EventType) -> bool {
        self.bindings.contains_key(&(element.clone(), event_type))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl<A: Clone> Default for EventRouter<A> {
    fn default() -> Self {
        Self::new()
    }
}
