//! User-facing strings for the console client.

use crate::text::{format_size, shorten};

pub const DEFAULT_FAREWELL: &str = "Quitting LanChat. See you next time!";

/// Display width kept for file names inside system messages.
const FILE_NAME_WIDTH: usize = 40;

pub const CLEAR_UNSUPPORTED: &str = "Clearing the chat is not supported in console mode";
pub const NOT_LOGGED_ON: &str = "You can not send a chat message without being logged on";
pub const AWAY_SEND_REFUSED: &str = "You can not send a chat message while away";
pub const UNEXPECTED_FAILURE: &str = "Something went wrong handling that line, see the log for details";
pub const NO_PENDING_TRANSFERS: &str = "No file transfers are waiting for an answer";

pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "/help               show this list",
    "/whoami             show your nick and status",
    "/nick <name>        change your nick",
    "/away <message>     mark yourself as away",
    "/back               return from away",
    "/transfers          list file transfers waiting for an answer",
    "/receive <id>       accept an incoming file",
    "/reject <id>        decline an incoming file",
    "/cancel <id>        abort a file transfer",
    "/clear              clear the chat (not available in console mode)",
    "/quit               exit the client",
    "Anything not starting with / is sent as a chat message.",
];

pub fn unknown_command(name: &str) -> String {
    format!("Unknown command: /{name}. Type /help for a list of commands")
}

pub fn missing_argument(command: &str, usage: &str) -> String {
    format!("/{command} needs an argument: /{command} {usage}")
}

pub fn file_offer(peer: &str, file_name: &str, size: u64, id: u32) -> String {
    format!(
        "{peer} is trying to send you the file {} ({}). Type /receive {id} to accept or /reject {id} to decline",
        shorten(file_name, FILE_NAME_WIDTH),
        format_size(size)
    )
}

pub fn transfer_started(receiving: bool, peer: &str, file_name: &str, size: u64) -> String {
    let file = shorten(file_name, FILE_NAME_WIDTH);
    let size = format_size(size);
    if receiving {
        format!("Receiving {file} ({size}) from {peer}")
    } else {
        format!("Sending {file} ({size}) to {peer}")
    }
}

pub fn transfer_completed(receiving: bool, peer: &str, file_name: &str) -> String {
    let file = shorten(file_name, FILE_NAME_WIDTH);
    if receiving {
        format!("Successfully received {file} from {peer}")
    } else {
        format!("{file} successfully sent to {peer}")
    }
}

pub fn transfer_failed(peer: &str, file_name: &str, reason: &str) -> String {
    format!(
        "Transfer of {} with {peer} failed: {reason}",
        shorten(file_name, FILE_NAME_WIDTH)
    )
}

pub fn transfer_canceled(peer: &str, file_name: &str) -> String {
    format!(
        "Transfer of {} with {peer} was canceled",
        shorten(file_name, FILE_NAME_WIDTH)
    )
}

pub fn transfer_rejected(peer: &str, file_name: &str) -> String {
    format!(
        "You declined {} from {peer}",
        shorten(file_name, FILE_NAME_WIDTH)
    )
}
