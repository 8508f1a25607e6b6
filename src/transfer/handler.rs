use std::sync::Arc;

use super::FileTransfer;
use crate::console::MessageDisplay;
use crate::log_debug;
use crate::messages;

/// Lifecycle notifications from whatever moves the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    Started,
    Completed,
    Failed(String),
    Canceled,
}

/// Turns transfer lifecycle events into transcript lines.
pub struct TransferHandler {
    transfer: Arc<FileTransfer>,
    display: Arc<dyn MessageDisplay>,
}

impl TransferHandler {
    pub fn new(transfer: Arc<FileTransfer>, display: Arc<dyn MessageDisplay>) -> Self {
        Self { transfer, display }
    }

    pub fn transfer(&self) -> &Arc<FileTransfer> {
        &self.transfer
    }

    pub fn report(&self, event: TransferEvent) {
        let transfer = &self.transfer;
        let peer = transfer.peer();
        let file = transfer.file_name();
        log_debug(&format!("transfer {} event: {event:?}", transfer.id()));
        let line = match event {
            TransferEvent::Started => {
                messages::transfer_started(transfer.is_receiving(), peer, file, transfer.size())
            }
            TransferEvent::Completed => {
                messages::transfer_completed(transfer.is_receiving(), peer, file)
            }
            TransferEvent::Failed(reason) => messages::transfer_failed(peer, file, &reason),
            TransferEvent::Canceled => messages::transfer_canceled(peer, file),
        };
        self.display.show_system_message(&line);
    }
}
