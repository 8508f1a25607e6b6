//! In-process chat session behind the console.
//!
//! Handles the slash commands and the chat-send path for a client that is not
//! wired to a network. A networking layer plugs in by calling
//! [`LocalSession::receive_file`] from its own threads.

mod commands;
mod profile;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use commands::{parse_command, SessionCommand};
pub use profile::Profile;

use crate::console::{ChatSender, CommandError, CommandHandler, SendError};
use crate::frontend::ConsoleUi;
use crate::messages;
use crate::text::{format_size, is_valid_nick, NICK_RULE};
use crate::transfer::{FileTransfer, TransferDirection, TransferEvent, TransferState};
use crate::{lock_or_recover, log_debug, log_debug_content};

#[derive(Default)]
struct SessionState {
    logged_on: bool,
    next_transfer_id: u32,
    pending: BTreeMap<u32, Arc<FileTransfer>>,
}

pub struct LocalSession {
    profile: Arc<Profile>,
    ui: Arc<ConsoleUi>,
    state: Mutex<SessionState>,
}

impl LocalSession {
    pub fn new(profile: Arc<Profile>, ui: Arc<ConsoleUi>) -> Self {
        Self {
            profile,
            ui,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    pub fn log_on(&self) {
        lock_or_recover(&self.state, "session").logged_on = true;
        log_debug("session logged on");
        self.system(&format!("You logged on as {}", self.profile.nick()));
    }

    pub fn log_off(&self) {
        lock_or_recover(&self.state, "session").logged_on = false;
        log_debug("session logged off");
    }

    pub fn is_logged_on(&self) -> bool {
        lock_or_recover(&self.state, "session").logged_on
    }

    /// Transfers still waiting for the user, oldest first. A transfer that was
    /// just decided may sit in the table until its waiter removes it; it is skipped.
    pub fn pending_transfers(&self) -> Vec<Arc<FileTransfer>> {
        lock_or_recover(&self.state, "session")
            .pending
            .values()
            .filter(|transfer| transfer.decision().is_pending())
            .cloned()
            .collect()
    }

    /// Present an inbound file and block until it is accepted, rejected or canceled.
    ///
    /// Runs on the caller's thread (the network layer's), never the input thread,
    /// since `/receive` and `/reject` arrive through the input thread. The caller
    /// inspects the returned transfer's state to decide what to do next.
    pub fn receive_file(&self, peer: &str, file_name: &str, size: u64) -> Arc<FileTransfer> {
        let transfer = self.register_incoming(peer, file_name, size);
        if !self.ui.ask_file_save(&transfer) {
            transfer.decision().reject();
        }
        let state = self.ui.show_file_save(&transfer);
        lock_or_recover(&self.state, "session")
            .pending
            .remove(&transfer.id());

        match state {
            TransferState::Accepted => {
                self.ui
                    .show_transfer(Arc::clone(&transfer))
                    .report(TransferEvent::Started);
            }
            TransferState::Rejected => {
                self.system(&messages::transfer_rejected(peer, file_name));
            }
            TransferState::Canceled => {
                self.ui
                    .show_transfer(Arc::clone(&transfer))
                    .report(TransferEvent::Canceled);
            }
            TransferState::Pending => {}
        }
        transfer
    }

    fn register_incoming(&self, peer: &str, file_name: &str, size: u64) -> Arc<FileTransfer> {
        let mut state = lock_or_recover(&self.state, "session");
        state.next_transfer_id += 1;
        let transfer = Arc::new(FileTransfer::new(
            state.next_transfer_id,
            TransferDirection::Receive,
            peer,
            file_name,
            size,
        ));
        state.pending.insert(transfer.id(), Arc::clone(&transfer));
        log_debug(&format!("transfer {} registered", transfer.id()));
        transfer
    }

    fn pending_transfer(&self, id: u32) -> Result<Arc<FileTransfer>, CommandError> {
        lock_or_recover(&self.state, "session")
            .pending
            .get(&id)
            .cloned()
            .ok_or_else(|| CommandError::Invalid(format!("No pending file transfer with id {id}")))
    }

    fn decide(
        &self,
        id: u32,
        decide: impl FnOnce(&FileTransfer) -> bool,
    ) -> Result<(), CommandError> {
        let transfer = self.pending_transfer(id)?;
        if decide(&transfer) {
            return Ok(());
        }
        Err(CommandError::Invalid(format!(
            "File transfer {id} was already {}",
            transfer.state().label()
        )))
    }

    fn execute(&self, command: SessionCommand) -> Result<(), CommandError> {
        match command {
            SessionCommand::Help => {
                for line in messages::HELP_LINES {
                    self.system(line);
                }
            }
            SessionCommand::WhoAmI => {
                let line = match self.profile.away_message() {
                    Some(away) => format!("You are {} (away: {away})", self.profile.nick()),
                    None => format!("You are {}", self.profile.nick()),
                };
                self.system(&line);
            }
            SessionCommand::Nick(nick) => self.change_nick(&nick)?,
            SessionCommand::Away(message) => {
                if self.profile.is_away() {
                    return Err(CommandError::Invalid("You are already away".to_string()));
                }
                self.system(&format!("You went away: {message}"));
                self.profile.set_away(Some(message));
            }
            SessionCommand::Back => {
                if !self.profile.is_away() {
                    return Err(CommandError::Invalid("You are not away".to_string()));
                }
                self.profile.set_away(None);
                self.system("You came back");
            }
            SessionCommand::Transfers => self.list_transfers(),
            SessionCommand::Receive(id) => self.decide(id, |t| t.decision().accept())?,
            SessionCommand::Reject(id) => self.decide(id, |t| t.decision().reject())?,
            SessionCommand::Cancel(id) => self.decide(id, |t| t.decision().cancel())?,
            SessionCommand::Clear => self.ui.clear_chat(),
            SessionCommand::Quit => self.ui.quit(),
        }
        Ok(())
    }

    fn change_nick(&self, nick: &str) -> Result<(), CommandError> {
        if !is_valid_nick(nick) {
            return Err(CommandError::Invalid(format!(
                "'{nick}' is not a valid nick: {NICK_RULE}"
            )));
        }
        if nick == self.profile.nick() {
            return Err(CommandError::Invalid(format!("You are already called {nick}")));
        }
        self.profile.set_nick(nick);
        self.system(&format!("You changed nick to {nick}"));
        Ok(())
    }

    fn list_transfers(&self) {
        let pending = self.pending_transfers();
        if pending.is_empty() {
            self.system(messages::NO_PENDING_TRANSFERS);
            return;
        }
        for transfer in pending {
            self.system(&format!(
                "[{}] {} from {} ({})",
                transfer.id(),
                transfer.file_name(),
                transfer.peer(),
                format_size(transfer.size())
            ));
        }
    }

    fn system(&self, text: &str) {
        self.ui.display().show_system_message(text);
    }
}

impl CommandHandler for LocalSession {
    fn parse(&self, command: &str) -> Result<(), CommandError> {
        self.execute(parse_command(command)?)
    }
}

impl ChatSender for LocalSession {
    fn send_chat_message(&self, text: &str) -> Result<(), SendError> {
        if !self.is_logged_on() {
            return Err(SendError::Refused(messages::NOT_LOGGED_ON.to_string()));
        }
        if self.profile.is_away() {
            return Err(SendError::Refused(messages::AWAY_SEND_REFUSED.to_string()));
        }
        log_debug_content(&format!("sent chat message: {text}"));
        Ok(())
    }
}
