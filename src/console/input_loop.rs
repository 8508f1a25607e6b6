use anyhow::{Context, Result};
use std::sync::Arc;
use std::thread;

use super::dispatch::Dispatcher;
use super::line_source::LineSource;
use super::shutdown::{HostProcess, ShutdownHook};
use crate::log_debug;

/// Exit status used when the input stream ends or breaks. A deliberate quit
/// goes through `/quit` and exits with 0 instead.
pub const UNEXPECTED_EXIT_STATUS: i32 = 1;

const INPUT_THREAD_NAME: &str = "console-input";

/// Why the read loop stopped.
#[derive(Debug)]
pub enum LoopExit {
    EndOfStream,
    ReadFailed(std::io::Error),
}

/// Reads lines, dispatches them in order, and terminates the process when input runs out.
pub struct InputLoop {
    source: Box<dyn LineSource>,
    dispatcher: Dispatcher,
    shutdown_hook: Arc<ShutdownHook>,
    host: Arc<dyn HostProcess>,
}

impl InputLoop {
    pub fn new(
        source: Box<dyn LineSource>,
        dispatcher: Dispatcher,
        shutdown_hook: Arc<ShutdownHook>,
        host: Arc<dyn HostProcess>,
    ) -> Self {
        Self {
            source,
            dispatcher,
            shutdown_hook,
            host,
        }
    }

    /// Run on a dedicated, named thread. Call once.
    pub fn spawn(self) -> Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name(INPUT_THREAD_NAME.to_string())
            .spawn(move || self.run())
            .context("failed to spawn console input thread")
    }

    /// Register the farewell hook (a no-op if the owner already did), process
    /// input until it ends, then terminate with [`UNEXPECTED_EXIT_STATUS`].
    /// Only returns if the host's `terminate` does.
    pub fn run(mut self) {
        self.host
            .register_termination_callback(Arc::clone(&self.shutdown_hook));
        log_debug("console input loop started");
        tracing::info!("console input loop started");

        let exit = self.read_until_exit();
        match &exit {
            LoopExit::EndOfStream => {
                log_debug("stdin reached end of stream");
                tracing::warn!("input stream ended");
            }
            LoopExit::ReadFailed(err) => {
                log_debug(&format!("stdin read error: {err}"));
                tracing::error!(error = %err, "input stream failed");
            }
        }

        self.host.terminate(UNEXPECTED_EXIT_STATUS);
    }

    fn read_until_exit(&mut self) -> LoopExit {
        loop {
            let line = match self.source.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return LoopExit::EndOfStream,
                Err(err) => return LoopExit::ReadFailed(err),
            };
            self.dispatcher.dispatch(&line);
        }
    }
}
