//! Console front-end for a LAN chat client.
//!
//! The interesting part is the line-oriented input loop: one thread reads stdin,
//! turns each line into a command or a chat message, and hands it to the session.
//! Shutdown prints a farewell exactly once no matter how the process ends, and
//! inbound file transfers block their caller until someone decides on them.

pub mod config;
pub mod console;
pub mod display;
pub mod frontend;
mod lock;
mod logging;
pub mod messages;
pub mod session;
mod telemetry;
#[cfg(test)]
pub(crate) mod test_support;
pub mod text;
pub mod transfer;

pub(crate) use lock::lock_or_recover;
pub use logging::{
    crash_log_path, init_logging, install_panic_logger, log_debug, log_debug_content,
    log_file_path, log_panic,
};
