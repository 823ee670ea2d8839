//! Epoch Showcase
//!
//! The era timeline and everything hanging off it:
//!
//! - **Eras**: the ordered [`EraRecord`] table with per-slot demo markup
//! - **Loop track**: the era sequence repeated N >= 3 times and scrolled by
//!   exactly one copy per cycle
//! - **Modal session**: the `closed -> opening -> open -> closing` lifecycle
//! - **Demos**: per-style nav/button/badge/carousel reactions, bound only
//!   after the modal's staggered reveal has finished
//! - **Runtime**: [`Showcase`] wires the orchestrator, the cursor overlay and
//!   every chapter widget to one surface and one motion engine
//!
//! # Example
//!
//! ```rust
//! use epoch_showcase::{build_scene, ModalPhase, Showcase, ShowcaseConfig};
//!
//! let config = ShowcaseConfig::default();
//! let mut showcase = Showcase::new(build_scene(&config), &config).unwrap();
//!
//! assert!(showcase.select_card(7));
//! assert_eq!(showcase.orchestrator().open_era_index(), Some(1));
//! for _ in 0..100 {
//!     showcase.tick(16.0);
//! }
//! assert_eq!(showcase.phase(), ModalPhase::Open);
//! ```

pub mod config;
pub mod demos;
pub mod era;
pub mod error;
pub mod modal;
pub mod orchestrator;
pub mod runtime;
pub mod scene;
pub mod track;

pub use config::{CursorConfig, ModalConfig, ShowcaseConfig, TimelineConfig};
pub use demos::{DemoAction, DemoPanel, StyleBehavior};
pub use era::{builtin_eras, DemoMarkup, DemoSlot, EraRecord, EraStyle};
pub use error::{Result, ShowcaseError};
pub use modal::{ModalInput, ModalPhase, ModalSession};
pub use orchestrator::{cues, ShowcaseOrchestrator};
pub use runtime::Showcase;
pub use scene::{build_scene, ids};
pub use track::{LoopTrack, MIN_COPIES};
