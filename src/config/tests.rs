use super::{AppConfig, DEFAULT_TRANSFER_POLL_MS};
use crate::messages::DEFAULT_FAREWELL;
use clap::Parser;
use std::time::Duration;

fn config_from(args: &[&str]) -> AppConfig {
    let mut argv = vec!["test-app", "--nick", "tester"];
    argv.extend_from_slice(args);
    AppConfig::parse_from(argv)
}

#[test]
fn defaults_validate() {
    let mut cfg = config_from(&[]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.transfer_poll_ms, DEFAULT_TRANSFER_POLL_MS);
    assert_eq!(cfg.transfer_poll_interval(), Duration::from_millis(500));
    assert_eq!(cfg.farewell_message(), DEFAULT_FAREWELL);
}

#[test]
fn trims_nick_before_storing() {
    let mut cfg = AppConfig::parse_from(["test-app", "--nick", "  kari "]);
    cfg.validate().expect("valid nick");
    assert_eq!(cfg.nick, "kari");
}

#[test]
fn rejects_invalid_nicks() {
    for nick in ["", "has space", "waytoolongnick", "semi;colon"] {
        let mut cfg = AppConfig::parse_from(["test-app", "--nick", nick]);
        assert!(cfg.validate().is_err(), "nick {nick:?} should be rejected");
    }
}

#[test]
fn accepts_nick_with_allowed_punctuation() {
    let mut cfg = AppConfig::parse_from(["test-app", "--nick", "a.b-c_9"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_poll_interval_out_of_bounds() {
    let mut cfg = config_from(&["--transfer-poll-ms", "9"]);
    assert!(cfg.validate().is_err());

    let mut cfg = config_from(&["--transfer-poll-ms", "10001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_poll_interval_bounds() {
    let mut cfg = config_from(&["--transfer-poll-ms", "10"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = config_from(&["--transfer-poll-ms", "10000"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_blank_or_multiline_farewell() {
    let mut cfg = config_from(&["--farewell", "   "]);
    assert!(cfg.validate().is_err());

    let mut cfg = config_from(&["--farewell", "bye\nnow"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn custom_farewell_replaces_default() {
    let mut cfg = config_from(&["--farewell", "See ya"]);
    cfg.validate().expect("valid farewell");
    assert_eq!(cfg.farewell_message(), "See ya");
}
