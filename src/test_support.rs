//! Recording fakes for the collaborator traits.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::console::{HostProcess, LineSource, MessageDisplay, ShutdownHook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shown {
    Own(String),
    System(String),
}

#[derive(Default)]
pub(crate) struct RecordingDisplay {
    lines: Mutex<Vec<Shown>>,
}

impl RecordingDisplay {
    pub(crate) fn lines(&self) -> Vec<Shown> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn system_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                Shown::System(text) => Some(text),
                Shown::Own(_) => None,
            })
            .collect()
    }

    pub(crate) fn own_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                Shown::Own(text) => Some(text),
                Shown::System(_) => None,
            })
            .collect()
    }
}

impl MessageDisplay for RecordingDisplay {
    fn show_own_message(&self, text: &str) {
        self.lines.lock().unwrap().push(Shown::Own(text.to_string()));
    }

    fn show_system_message(&self, text: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(Shown::System(text.to_string()));
    }
}

/// Host that records exit codes instead of exiting. `terminate` still fires hooks.
#[derive(Default)]
pub(crate) struct RecordingHost {
    hooks: crate::console::HookRegistry,
    exits: Mutex<Vec<i32>>,
}

impl RecordingHost {
    pub(crate) fn exits(&self) -> Vec<i32> {
        self.exits.lock().unwrap().clone()
    }

    pub(crate) fn registered(&self) -> usize {
        self.hooks.len()
    }
}

impl HostProcess for RecordingHost {
    fn register_termination_callback(&self, hook: Arc<ShutdownHook>) {
        self.hooks.register(hook);
    }

    fn terminate(&self, code: i32) {
        self.exits.lock().unwrap().push(code);
        self.hooks.fire_all();
    }
}

/// Hands out canned read results, then end of stream.
pub(crate) struct ScriptedLines {
    script: VecDeque<io::Result<Option<String>>>,
}

impl ScriptedLines {
    pub(crate) fn lines(lines: &[&str]) -> Self {
        Self {
            script: lines
                .iter()
                .map(|line| Ok(Some(line.to_string())))
                .collect(),
        }
    }

    pub(crate) fn then_error(mut self, kind: io::ErrorKind) -> Self {
        self.script
            .push_back(Err(io::Error::new(kind, "scripted failure")));
        self
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.script.pop_front().unwrap_or(Ok(None))
    }
}
