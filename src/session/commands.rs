use crate::console::CommandError;
use crate::messages::{missing_argument, unknown_command};

/// Commands understood by the local session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SessionCommand {
    Help,
    WhoAmI,
    Nick(String),
    Away(String),
    Back,
    Transfers,
    Receive(u32),
    Reject(u32),
    Cancel(u32),
    Clear,
    Quit,
}

/// Split `name args` and map it onto a command. Names are case-insensitive.
pub(super) fn parse_command(text: &str) -> Result<SessionCommand, CommandError> {
    let trimmed = text.trim();
    let (name, args) = match trimmed.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (trimmed, ""),
    };
    let name = name.to_lowercase();

    match name.as_str() {
        "help" | "h" => Ok(SessionCommand::Help),
        "whoami" => Ok(SessionCommand::WhoAmI),
        "nick" => required(&name, args, "<name>").map(SessionCommand::Nick),
        "away" => required(&name, args, "<message>").map(SessionCommand::Away),
        "back" => Ok(SessionCommand::Back),
        "transfers" => Ok(SessionCommand::Transfers),
        "receive" => transfer_id(&name, args).map(SessionCommand::Receive),
        "reject" => transfer_id(&name, args).map(SessionCommand::Reject),
        "cancel" => transfer_id(&name, args).map(SessionCommand::Cancel),
        "clear" => Ok(SessionCommand::Clear),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        _ => Err(CommandError::Invalid(unknown_command(&name))),
    }
}

fn required(name: &str, args: &str, usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Invalid(missing_argument(name, usage)));
    }
    Ok(args.to_string())
}

fn transfer_id(name: &str, args: &str) -> Result<u32, CommandError> {
    let raw = required(name, args, "<id>")?;
    raw.parse::<u32>()
        .map_err(|_| CommandError::Invalid(format!("'{raw}' is not a transfer id")))
}
