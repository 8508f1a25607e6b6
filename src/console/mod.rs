//! Console interaction loop.
//!
//! - `line_source`: blocking line reads from stdin (or any `BufRead` in tests)
//! - `dispatch`: command vs. chat classification and per-line error containment
//! - `input_loop`: the dedicated reader thread and its exit policy
//! - `shutdown`: single-fire farewell hook and the process host it registers with

mod dispatch;
mod input_loop;
mod line_source;
mod shutdown;


pub use dispatch::{
    classify, ChatSender, CommandError, CommandHandler, DispatchOutcome, Dispatcher,
    LineClassification, MessageDisplay, SendError, COMMAND_MARKER,
};
pub use input_loop::{InputLoop, LoopExit, UNEXPECTED_EXIT_STATUS};
pub use line_source::{LineSource, ReaderLineSource, StdinLineSource};
pub use shutdown::{HookRegistry, HostProcess, ProcessHost, ShutdownHook};
