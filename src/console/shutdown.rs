use anyhow::Result;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, Once};

use crate::{lock_or_recover, log_debug};

type HookAction = Box<dyn Fn() + Send + Sync>;

/// Cleanup action that runs at most once per process.
pub struct ShutdownHook {
    once: Once,
    action: HookAction,
}

impl ShutdownHook {
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            once: Once::new(),
            action: Box::new(action),
        }
    }

    /// Print `message` on stdout when the process goes down. The message is
    /// captured now; nothing else is touched when the hook runs.
    pub fn farewell(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::new(move || {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{message}");
            let _ = stdout.flush();
        })
    }

    /// Run the action unless it already ran. Returns whether this call ran it.
    /// A caller that loses the race blocks until the winner's run has finished,
    /// so nobody reaches `process::exit` ahead of the farewell.
    pub fn fire(&self) -> bool {
        let mut ran = false;
        self.once.call_once(|| {
            (self.action)();
            ran = true;
        });
        ran
    }

    /// True once the action has run to completion.
    pub fn has_fired(&self) -> bool {
        self.once.is_completed()
    }
}

/// The hosting process: termination callbacks and exit.
pub trait HostProcess: Send + Sync {
    fn register_termination_callback(&self, hook: Arc<ShutdownHook>);

    /// Run registered callbacks and end the process with `code`. Test hosts may return.
    fn terminate(&self, code: i32);
}

/// Hooks registered with a host, shared with the signal watcher thread.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Arc<Mutex<Vec<Arc<ShutdownHook>>>>,
}

impl HookRegistry {
    /// Registering the same hook twice is a no-op.
    pub fn register(&self, hook: Arc<ShutdownHook>) {
        let mut hooks = lock_or_recover(&self.hooks, "shutdown hooks");
        if hooks.iter().any(|known| Arc::ptr_eq(known, &hook)) {
            return;
        }
        hooks.push(hook);
    }

    /// Fire every hook. The list is cloned first so a hook never runs under the lock.
    pub fn fire_all(&self) -> usize {
        let hooks: Vec<_> = lock_or_recover(&self.hooks, "shutdown hooks").clone();
        hooks.iter().filter(|hook| hook.fire()).count()
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.hooks, "shutdown hooks").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Real process host. Exits through `std::process::exit`; on Unix also turns
/// SIGINT, SIGTERM and SIGHUP into an orderly exit that runs the hooks.
pub struct ProcessHost {
    hooks: HookRegistry,
}

impl ProcessHost {
    pub fn new() -> Result<Self> {
        let hooks = HookRegistry::default();
        #[cfg(unix)]
        signals::spawn_signal_watcher(hooks.clone())?;
        Ok(Self { hooks })
    }
}

impl HostProcess for ProcessHost {
    fn register_termination_callback(&self, hook: Arc<ShutdownHook>) {
        self.hooks.register(hook);
    }

    fn terminate(&self, code: i32) {
        log_debug(&format!("terminating with status {code}"));
        tracing::info!(code, "process terminating");
        self.hooks.fire_all();
        std::process::exit(code);
    }
}

#[cfg(unix)]
mod signals {
    use super::HookRegistry;
    use anyhow::{Context, Result};
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::thread;

    use crate::log_debug;

    /// Hooks run on this thread, not in signal context, so they may lock and print.
    pub(super) fn spawn_signal_watcher(hooks: HookRegistry) -> Result<()> {
        let mut signals =
            Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;
        thread::Builder::new()
            .name("signal-watcher".to_string())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    log_debug(&format!("received signal {signal}, shutting down"));
                    tracing::info!(signal, "termination signal received");
                    hooks.fire_all();
                    std::process::exit(128 + signal);
                }
            })
            .context("failed to spawn signal watcher thread")?;
        Ok(())
    }
}
