//! File transfer decisions as seen by the console.
//!
//! Moving the bytes is somebody else's job. This module only tracks whether a
//! transfer was accepted, rejected or canceled, lets a thread wait for that
//! answer, and reports progress lines to the transcript.

mod decision;
mod handler;
mod waiter;


use std::sync::Arc;

pub use decision::{TransferDecision, TransferState};
pub use handler::{TransferEvent, TransferHandler};
pub use waiter::DecisionWaiter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Receive,
    Send,
}

/// One file offered to or by a peer.
#[derive(Debug)]
pub struct FileTransfer {
    id: u32,
    direction: TransferDirection,
    peer: String,
    file_name: String,
    size: u64,
    decision: Arc<TransferDecision>,
}

impl FileTransfer {
    pub fn new(
        id: u32,
        direction: TransferDirection,
        peer: impl Into<String>,
        file_name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            id,
            direction,
            peer: peer.into(),
            file_name: file_name.into(),
            size,
            decision: Arc::new(TransferDecision::new()),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_receiving(&self) -> bool {
        self.direction == TransferDirection::Receive
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Handle for whoever makes the decision (user command or peer abort).
    pub fn decision(&self) -> &Arc<TransferDecision> {
        &self.decision
    }

    pub fn state(&self) -> TransferState {
        self.decision.state()
    }

    pub fn is_accepted(&self) -> bool {
        self.decision.is_accepted()
    }

    pub fn is_rejected(&self) -> bool {
        self.decision.is_rejected()
    }

    pub fn is_canceled(&self) -> bool {
        self.decision.is_canceled()
    }
}
