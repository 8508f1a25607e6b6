use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

use crate::lock_or_recover;

/// Outcome of presenting a file transfer. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Pending,
    Accepted,
    Rejected,
    Canceled,
}

impl TransferState {
    fn as_u8(self) -> u8 {
        match self {
            TransferState::Pending => 0,
            TransferState::Accepted => 1,
            TransferState::Rejected => 2,
            TransferState::Canceled => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => TransferState::Accepted,
            2 => TransferState::Rejected,
            3 => TransferState::Canceled,
            _ => TransferState::Pending,
        }
    }

    pub fn is_resolved(self) -> bool {
        self != TransferState::Pending
    }

    pub fn label(self) -> &'static str {
        match self {
            TransferState::Pending => "pending",
            TransferState::Accepted => "accepted",
            TransferState::Rejected => "rejected",
            TransferState::Canceled => "canceled",
        }
    }
}

/// Shared accept/reject/cancel flag. Written once by whoever decides, read by waiters.
///
/// Resolving also drops the wake-up sender, which disconnects every cloned
/// receiver at once; waiters see that without sharing a lock with the writer.
pub struct TransferDecision {
    state: AtomicU8,
    wake_tx: Mutex<Option<Sender<()>>>,
    wake_rx: Receiver<()>,
}

impl TransferDecision {
    pub fn new() -> Self {
        let (wake_tx, wake_rx) = crossbeam_channel::bounded(0);
        Self {
            state: AtomicU8::new(TransferState::Pending.as_u8()),
            wake_tx: Mutex::new(Some(wake_tx)),
            wake_rx,
        }
    }

    pub fn state(&self) -> TransferState {
        TransferState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_pending(&self) -> bool {
        self.state() == TransferState::Pending
    }

    pub fn is_accepted(&self) -> bool {
        self.state() == TransferState::Accepted
    }

    pub fn is_rejected(&self) -> bool {
        self.state() == TransferState::Rejected
    }

    pub fn is_canceled(&self) -> bool {
        self.state() == TransferState::Canceled
    }

    pub fn accept(&self) -> bool {
        self.resolve(TransferState::Accepted)
    }

    pub fn reject(&self) -> bool {
        self.resolve(TransferState::Rejected)
    }

    pub fn cancel(&self) -> bool {
        self.resolve(TransferState::Canceled)
    }

    /// Move Pending -> `outcome`. Returns false, leaving the state alone, if the
    /// decision was already made.
    fn resolve(&self, outcome: TransferState) -> bool {
        debug_assert!(outcome.is_resolved());
        let won = self
            .state
            .compare_exchange(
                TransferState::Pending.as_u8(),
                outcome.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if won {
            lock_or_recover(&self.wake_tx, "transfer decision").take();
        }
        won
    }

    /// Receiver that disconnects once the decision is made. Nothing is ever sent on it.
    pub(crate) fn wake_signal(&self) -> Receiver<()> {
        self.wake_rx.clone()
    }
}

impl Default for TransferDecision {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TransferDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferDecision")
            .field("state", &self.state())
            .finish()
    }
}
