//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use clap::Parser;

use defaults::default_nick;
pub use defaults::{DEFAULT_TRANSFER_POLL_MS, MAX_TRANSFER_POLL_MS, MIN_TRANSFER_POLL_MS};

/// CLI options for the console client.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "lanchat",
    about = "LanChat console client: chat from a plain terminal",
    author,
    version
)]
pub struct AppConfig {
    /// Nick name shown next to your own messages
    #[arg(long, env = "LANCHAT_NICK", default_value_t = default_nick())]
    pub nick: String,

    /// How often a pending file transfer re-checks its decision (milliseconds)
    #[arg(long = "transfer-poll-ms", default_value_t = DEFAULT_TRANSFER_POLL_MS)]
    pub transfer_poll_ms: u64,

    /// Message printed once when the client exits
    #[arg(long)]
    pub farewell: Option<String>,

    /// Print system messages without ANSI colors
    #[arg(long = "no-color", env = "NO_COLOR", default_value_t = false)]
    pub no_color: bool,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "LANCHAT_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "LANCHAT_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow chat text to appear in the debug log
    #[arg(
        long = "log-content",
        env = "LANCHAT_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}
