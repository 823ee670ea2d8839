//! Modal session lifecycle
//!
//! ```text
//!            Open              Revealed
//! Closed ----------> Opening ----------> Open
//!   ^                 |   ^               |
//!   | Faded     Close |   | Open          | Close
//!   |                 v   |               |
//!   +------------- Closing <--------------+
//! ```
//!
//! The open era index is held exactly while the phase is not `Closed`.

use epoch_core::{StateChange, StateMachine};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalInput {
    Open,
    /// Staggered reveal finished
    Revealed,
    Close,
    /// Overlay fade-out finished
    Faded,
}

#[derive(Clone, Debug)]
pub struct ModalSession {
    machine: StateMachine<ModalPhase, ModalInput>,
    open_era_index: Option<usize>,
}

impl ModalSession {
    pub fn new() -> Self {
        use ModalInput as I;
        use ModalPhase as P;
        Self {
            machine: StateMachine::builder(P::Closed)
                .on(P::Closed, I::Open, P::Opening)
                .on(P::Closing, I::Open, P::Opening)
                .on(P::Opening, I::Revealed, P::Open)
                .on(P::Opening, I::Close, P::Closing)
                .on(P::Open, I::Close, P::Closing)
                .on(P::Closing, I::Faded, P::Closed)
                .build(),
            open_era_index: None,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.machine.current_state()
    }

    pub fn open_era_index(&self) -> Option<usize> {
        self.open_era_index
    }

    /// Whether the overlay should intercept input
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase(), ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn open(&mut self, era_index: usize) -> Option<StateChange<ModalPhase, ModalInput>> {
        let change = self.send(ModalInput::Open)?;
        self.open_era_index = Some(era_index);
        Some(change)
    }

    pub fn revealed(&mut self) -> Option<StateChange<ModalPhase, ModalInput>> {
        self.send(ModalInput::Revealed)
    }

    pub fn close(&mut self) -> Option<StateChange<ModalPhase, ModalInput>> {
        self.send(ModalInput::Close)
    }

    pub fn faded(&mut self) -> Option<StateChange<ModalPhase, ModalInput>> {
        let change = self.send(ModalInput::Faded)?;
        self.open_era_index = None;
        Some(change)
    }

    fn send(&mut self, input: ModalInput) -> Option<StateChange<ModalPhase, ModalInput>> {
        let change = self.machine.send(input)?;
        tracing::info!(from = ?change.from, to = ?change.to, "modal phase changed");
        Some(change)
    }
}

impl Default for ModalSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_index_invariant(session: &ModalSession) {
        assert_eq!(
            session.open_era_index().is_some(),
            session.phase() != ModalPhase::Closed
        );
    }

    #[test]
    fn test_full_lifecycle() {
        let mut session = ModalSession::new();
        assert_index_invariant(&session);

        assert!(session.open(1).is_some());
        assert_eq!(session.phase(), ModalPhase::Opening);
        assert!(session.is_interactive());
        assert_index_invariant(&session);

        assert!(session.open(2).is_none());
        assert_eq!(session.open_era_index(), Some(1));

        session.revealed();
        assert_eq!(session.phase(), ModalPhase::Open);
        session.close();
        assert_eq!(session.phase(), ModalPhase::Closing);
        assert!(!session.is_interactive());
        assert_index_invariant(&session);

        session.faded();
        assert_eq!(session.phase(), ModalPhase::Closed);
        assert_index_invariant(&session);
    }

    #[test]
    fn test_close_while_opening_converges() {
        let mut session = ModalSession::new();
        session.open(0);
        assert!(session.close().is_some());
        // A late reveal is ignored once closing
        assert!(session.revealed().is_none());
        session.faded();
        assert_eq!(session.phase(), ModalPhase::Closed);
        assert_eq!(session.open_era_index(), None);
    }

    #[test]
    fn test_reopen_while_closing() {
        let mut session = ModalSession::new();
        session.open(0);
        session.close();
        assert!(session.open(4).is_some());
        assert_eq!(session.open_era_index(), Some(4));
        assert!(session.faded().is_none());
    }

    #[test]
    fn test_closed_ignores_stray_inputs() {
        let mut session = ModalSession::new();
        assert!(session.close().is_none());
        assert!(session.faded().is_none());
        assert!(session.revealed().is_none());
        assert_eq!(session.machine.history().count(), 0);
    }
}
