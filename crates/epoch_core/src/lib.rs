//! Epoch Core Runtime
//!
//! This crate provides the foundational primitives shared by the motion
//! engine and the showcase:
//!
//! - **Geometry**: points and rectangles in viewport coordinates
//! - **Elements & Properties**: addressable element ids and the closed set of
//!   numeric properties the motion engine can animate
//! - **State Machines**: typed flat state machines with transition history
//! - **Event Routing**: input events and a router that maps element events
//!   to caller-defined actions
//! - **Rendering Surface**: the capability set the core drives, plus an
//!   in-memory [`SceneSurface`] used by tests and headless runs
//!
//! # Example
//!
//! ```rust
//! use epoch_core::{ElementId, Property, Rect, RenderSurface, SceneSurface};
//!
//! let mut scene = SceneSurface::new();
//! let card = ElementId::new("card");
//! scene.insert(card.clone(), Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! scene.set_property(&card, Property::TranslateX, 12.0).unwrap();
//! assert_eq!(scene.property(&card, Property::TranslateX), Some(12.0));
//! ```

pub mod element;
pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod markup;
pub mod scene;
pub mod surface;

pub use element::{ElementId, Property};
pub use error::{SurfaceError, SurfaceResult};
pub use events::{Event, EventData, EventRouter, EventType, KeyCode};
pub use fsm::{StateChange, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
pub use markup::{scan_fragment, MarkupNode};
pub use scene::SceneSurface;
pub use surface::{NodeInfo, RenderSurface};
