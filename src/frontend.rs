//! Wiring between the session, the transcript, and the console input loop.

use anyhow::Result;
use std::sync::Arc;
use std::thread;

use crate::config::AppConfig;
use crate::console::{
    ChatSender, CommandHandler, Dispatcher, HostProcess, InputLoop, LineSource, MessageDisplay,
    ShutdownHook,
};
use crate::display::ConsoleDisplay;
use crate::log_debug;
use crate::messages;
use crate::session::{LocalSession, Profile};
use crate::transfer::{DecisionWaiter, FileTransfer, TransferHandler, TransferState};

/// The UI operations the session calls back into.
pub struct ConsoleUi {
    display: Arc<dyn MessageDisplay>,
    host: Arc<dyn HostProcess>,
    waiter: DecisionWaiter,
}

impl ConsoleUi {
    pub fn new(
        display: Arc<dyn MessageDisplay>,
        host: Arc<dyn HostProcess>,
        waiter: DecisionWaiter,
    ) -> Self {
        Self {
            display,
            host,
            waiter,
        }
    }

    pub fn display(&self) -> &Arc<dyn MessageDisplay> {
        &self.display
    }

    /// There is no dialog in a terminal: explain how to answer and say yes.
    pub fn ask_file_save(&self, transfer: &FileTransfer) -> bool {
        self.display.show_system_message(&messages::file_offer(
            transfer.peer(),
            transfer.file_name(),
            transfer.size(),
            transfer.id(),
        ));
        true
    }

    /// Block the calling thread until the user or the peer settles the transfer.
    pub fn show_file_save(&self, transfer: &FileTransfer) -> TransferState {
        let state = self.waiter.wait_for_decision(transfer);
        log_debug(&format!(
            "transfer {} resolved as {}",
            transfer.id(),
            state.label()
        ));
        tracing::info!(transfer = transfer.id(), state = state.label(), "transfer decided");
        state
    }

    pub fn show_transfer(&self, transfer: Arc<FileTransfer>) -> TransferHandler {
        TransferHandler::new(transfer, Arc::clone(&self.display))
    }

    pub fn clear_chat(&self) {
        self.display.show_system_message(messages::CLEAR_UNSUPPORTED);
    }

    /// Deliberate exit; the farewell hook still runs.
    pub fn quit(&self) {
        log_debug("quit requested");
        self.host.terminate(0);
    }

    /// Lines already land in the transcript; nothing to flash or beep.
    pub fn notify_message_arrived(&self) {}

    pub fn is_focused(&self) -> bool {
        true
    }

    pub fn is_visible(&self) -> bool {
        true
    }
}

/// Builds everything the console client needs and starts the input thread.
pub struct ConsoleFrontEnd {
    profile: Arc<Profile>,
    display: Arc<dyn MessageDisplay>,
    ui: Arc<ConsoleUi>,
    session: Arc<LocalSession>,
    host: Arc<dyn HostProcess>,
    farewell: Arc<ShutdownHook>,
}

impl ConsoleFrontEnd {
    /// Front-end printing to stdout, configured from the CLI.
    pub fn new(config: &AppConfig, host: Arc<dyn HostProcess>) -> Self {
        let profile = Arc::new(Profile::new(config.nick.clone()));
        let display: Arc<dyn MessageDisplay> =
            Arc::new(ConsoleDisplay::stdout(Arc::clone(&profile), !config.no_color));
        let farewell = Arc::new(ShutdownHook::farewell(config.farewell_message()));
        Self::with_parts(
            profile,
            display,
            host,
            DecisionWaiter::new(config.transfer_poll_interval()),
            farewell,
        )
    }

    pub fn with_parts(
        profile: Arc<Profile>,
        display: Arc<dyn MessageDisplay>,
        host: Arc<dyn HostProcess>,
        waiter: DecisionWaiter,
        farewell: Arc<ShutdownHook>,
    ) -> Self {
        let ui = Arc::new(ConsoleUi::new(
            Arc::clone(&display),
            Arc::clone(&host),
            waiter,
        ));
        let session = Arc::new(LocalSession::new(Arc::clone(&profile), Arc::clone(&ui)));
        // registered before any thread exists, so every exit path sees it
        host.register_termination_callback(Arc::clone(&farewell));
        Self {
            profile,
            display,
            ui,
            session,
            host,
            farewell,
        }
    }

    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    pub fn ui(&self) -> &Arc<ConsoleUi> {
        &self.ui
    }

    pub fn session(&self) -> &Arc<LocalSession> {
        &self.session
    }

    /// Input loop reading from `source`, dispatching into this front-end's session.
    pub fn input_loop(&self, source: Box<dyn LineSource>) -> InputLoop {
        let commands: Arc<dyn CommandHandler> = self.session.clone();
        let chat: Arc<dyn ChatSender> = self.session.clone();
        let dispatcher = Dispatcher::new(commands, chat, Arc::clone(&self.display));
        InputLoop::new(
            source,
            dispatcher,
            Arc::clone(&self.farewell),
            Arc::clone(&self.host),
        )
    }

    /// Log on and start reading input on its own thread.
    pub fn start(&self, source: Box<dyn LineSource>) -> Result<thread::JoinHandle<()>> {
        self.session.log_on();
        self.input_loop(source).spawn()
    }
}
