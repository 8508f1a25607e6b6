use super::{AppConfig, MAX_TRANSFER_POLL_MS, MIN_TRANSFER_POLL_MS};
use crate::messages::DEFAULT_FAREWELL;
use crate::text::{is_valid_nick, NICK_RULE};
use anyhow::{bail, Result};
use clap::Parser;
use std::time::Duration;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize the nick.
    pub fn validate(&mut self) -> Result<()> {
        let nick = self.nick.trim();
        if !is_valid_nick(nick) {
            bail!("--nick '{}' is invalid: {NICK_RULE}", self.nick);
        }
        self.nick = nick.to_string();

        if !(MIN_TRANSFER_POLL_MS..=MAX_TRANSFER_POLL_MS).contains(&self.transfer_poll_ms) {
            bail!(
                "--transfer-poll-ms must be between {MIN_TRANSFER_POLL_MS} and {MAX_TRANSFER_POLL_MS}, got {}",
                self.transfer_poll_ms
            );
        }

        if let Some(farewell) = &self.farewell {
            if farewell.trim().is_empty() {
                bail!("--farewell must not be empty");
            }
            if farewell.contains(['\n', '\r']) {
                bail!("--farewell must be a single line");
            }
        }

        Ok(())
    }

    pub fn transfer_poll_interval(&self) -> Duration {
        Duration::from_millis(self.transfer_poll_ms)
    }

    pub fn farewell_message(&self) -> String {
        self.farewell
            .clone()
            .unwrap_or_else(|| DEFAULT_FAREWELL.to_string())
    }
}
