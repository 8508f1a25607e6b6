use std::fmt;
use std::sync::Arc;

use crate::messages::UNEXPECTED_FAILURE;
use crate::{log_debug, log_debug_content};

/// Lines starting with this (after trimming) are commands.
pub const COMMAND_MARKER: char = '/';

/// What a non-blank input line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClassification {
    /// Command text with the leading marker removed.
    Command(String),
    /// The line exactly as typed.
    ChatMessage(String),
}

/// Blank and whitespace-only lines classify as nothing.
pub fn classify(line: &str) -> Option<LineClassification> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.strip_prefix(COMMAND_MARKER) {
        Some(command) => Some(LineClassification::Command(command.to_string())),
        None => Some(LineClassification::ChatMessage(line.to_string())),
    }
}

/// Failure reported by the command collaborator.
#[derive(Debug)]
pub enum CommandError {
    /// Expected, user-facing problem (unknown command, bad arguments).
    Invalid(String),
    /// Anything the command handler did not anticipate.
    Unexpected(anyhow::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Invalid(message) => f.write_str(message),
            CommandError::Unexpected(err) => write!(f, "unexpected command failure: {err:#}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Failure reported by the chat-send collaborator.
#[derive(Debug)]
pub enum SendError {
    /// Expected refusal (not logged on, away, rejected by the network layer).
    Refused(String),
    Unexpected(anyhow::Error),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Refused(message) => f.write_str(message),
            SendError::Unexpected(err) => write!(f, "unexpected send failure: {err:#}"),
        }
    }
}

impl std::error::Error for SendError {}

/// Interprets command text (marker already stripped).
pub trait CommandHandler: Send + Sync {
    fn parse(&self, command: &str) -> Result<(), CommandError>;
}

/// Delivers a chat message to the other users.
pub trait ChatSender: Send + Sync {
    fn send_chat_message(&self, text: &str) -> Result<(), SendError>;
}

/// Where transcript lines end up. Fire-and-forget.
pub trait MessageDisplay: Send + Sync {
    fn show_own_message(&self, text: &str);
    fn show_system_message(&self, text: &str);
}

/// What happened to a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored,
    Command,
    CommandFailed(String),
    Sent,
    SendFailed(String),
    Unexpected(String),
}

/// Routes classified lines to the collaborators. No failure escapes `dispatch`.
#[derive(Clone)]
pub struct Dispatcher {
    commands: Arc<dyn CommandHandler>,
    chat: Arc<dyn ChatSender>,
    display: Arc<dyn MessageDisplay>,
}

impl Dispatcher {
    pub fn new(
        commands: Arc<dyn CommandHandler>,
        chat: Arc<dyn ChatSender>,
        display: Arc<dyn MessageDisplay>,
    ) -> Self {
        Self {
            commands,
            chat,
            display,
        }
    }

    pub fn dispatch(&self, line: &str) -> DispatchOutcome {
        match classify(line) {
            None => DispatchOutcome::Ignored,
            Some(LineClassification::Command(command)) => self.run_command(&command),
            Some(LineClassification::ChatMessage(text)) => self.send_chat(&text),
        }
    }

    fn run_command(&self, command: &str) -> DispatchOutcome {
        log_debug_content(&format!("command: /{command}"));
        match self.commands.parse(command) {
            Ok(()) => DispatchOutcome::Command,
            Err(CommandError::Invalid(message)) => {
                self.display.show_system_message(&message);
                DispatchOutcome::CommandFailed(message)
            }
            Err(CommandError::Unexpected(err)) => self.unexpected("command", &err),
        }
    }

    fn send_chat(&self, text: &str) -> DispatchOutcome {
        log_debug_content(&format!("chat message: {text}"));
        // the echo must only appear for messages that actually went out
        match self.chat.send_chat_message(text) {
            Ok(()) => {
                self.display.show_own_message(text);
                DispatchOutcome::Sent
            }
            Err(SendError::Refused(message)) => {
                self.display.show_system_message(&message);
                DispatchOutcome::SendFailed(message)
            }
            Err(SendError::Unexpected(err)) => self.unexpected("chat send", &err),
        }
    }

    fn unexpected(&self, path: &str, err: &anyhow::Error) -> DispatchOutcome {
        let detail = format!("{err:#}");
        log_debug(&format!("unexpected {path} failure: {detail}"));
        tracing::error!(path, error = %detail, "unexpected dispatch failure");
        self.display.show_system_message(UNEXPECTED_FAILURE);
        DispatchOutcome::Unexpected(detail)
    }
}
