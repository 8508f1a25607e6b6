use crossbeam_channel::RecvTimeoutError;
use std::time::Duration;

use super::{FileTransfer, TransferState};
use crate::config::DEFAULT_TRANSFER_POLL_MS;

/// Blocks a caller until a transfer's decision leaves `Pending`.
///
/// There is deliberately no overall timeout: a human may take as long as they
/// like to answer. Callers that need one must add it themselves.
#[derive(Debug, Clone, Copy)]
pub struct DecisionWaiter {
    poll_interval: Duration,
}

impl DecisionWaiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait for accept, reject or cancel and return which one it was.
    ///
    /// Wakes as soon as the decision is made; the poll interval only bounds how
    /// long a wake-up can be missed. No lock is held while waiting.
    pub fn wait_for_decision(&self, transfer: &FileTransfer) -> TransferState {
        let decision = transfer.decision();
        let wake = decision.wake_signal();
        loop {
            let state = decision.state();
            if state.is_resolved() {
                return state;
            }
            match wake.recv_timeout(self.poll_interval) {
                Ok(()) | Err(RecvTimeoutError::Timeout) => {}
                // sender dropped: resolved, picked up on the next read
                Err(RecvTimeoutError::Disconnected) => {}
            }
        }
    }
}

impl Default for DecisionWaiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TRANSFER_POLL_MS))
    }
}
