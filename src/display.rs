//! Transcript output for the console.

use crossterm::style::Stylize;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::console::MessageDisplay;
use crate::lock_or_recover;
use crate::session::Profile;

const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Writes timestamped transcript lines to stdout (or any writer in tests).
pub struct ConsoleDisplay {
    profile: Arc<Profile>,
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl ConsoleDisplay {
    pub fn stdout(profile: Arc<Profile>, color: bool) -> Self {
        Self::with_writer(profile, Box::new(io::stdout()), color)
    }

    pub fn with_writer(profile: Arc<Profile>, out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            profile,
            out: Mutex::new(out),
            color,
        }
    }

    /// A chat line from another user.
    pub fn show_user_message(&self, nick: &str, text: &str) {
        let line = format!("{} <{}>: {}", timestamp(), sanitize(nick), sanitize(text));
        self.write_line(&line);
    }

    fn write_line(&self, line: &str) {
        let mut out = lock_or_recover(&self.out, "console display");
        // a closed stdout is not worth dying over; the input loop decides when we stop
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

impl MessageDisplay for ConsoleDisplay {
    fn show_own_message(&self, text: &str) {
        self.show_user_message(&self.profile.nick(), text);
    }

    fn show_system_message(&self, text: &str) {
        let body = format!("*** {}", sanitize(text));
        let line = if self.color {
            format!("{} {}", timestamp(), body.dark_yellow())
        } else {
            format!("{} {body}", timestamp())
        };
        self.write_line(&line);
    }
}

fn timestamp() -> String {
    format!("[{}]", chrono::Local::now().format(TIMESTAMP_FORMAT))
}

/// Drop escape sequences and stray control characters so text can't drive the terminal.
/// Tabs are kept.
pub fn sanitize(text: &str) -> String {
    text.split('\t')
        .map(|piece| {
            strip_ansi_escapes::strip_str(piece)
                .chars()
                .filter(|ch| !ch.is_control())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\t")
}
