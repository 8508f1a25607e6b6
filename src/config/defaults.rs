use std::env;

use crate::text::is_valid_nick;

pub const DEFAULT_TRANSFER_POLL_MS: u64 = 500;
pub const MIN_TRANSFER_POLL_MS: u64 = 10;
pub const MAX_TRANSFER_POLL_MS: u64 = 10_000;

const FALLBACK_NICK: &str = "Console";

/// Login name when it is usable as a nick, otherwise a fixed fallback.
pub(super) fn default_nick() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .map(|name| name.trim().to_string())
        .find(|name| is_valid_nick(name))
        .unwrap_or_else(|| FALLBACK_NICK.to_string())
}
