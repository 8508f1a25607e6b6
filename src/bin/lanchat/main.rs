//! LanChat console entrypoint.
//!
//! - Input thread: reads stdin line by line and dispatches commands or chat
//! - Signal watcher: turns SIGINT/SIGTERM/SIGHUP into an orderly exit
//! - Main thread: waits on the input thread; it only returns if the thread panicked

use anyhow::Result;
use std::sync::Arc;

use lanchat::config::AppConfig;
use lanchat::console::{HostProcess, ProcessHost, StdinLineSource, UNEXPECTED_EXIT_STATUS};
use lanchat::frontend::ConsoleFrontEnd;
use lanchat::{init_logging, install_panic_logger, log_debug, log_file_path};

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_logging(&config);
    install_panic_logger();
    log_debug("=== LanChat console started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let host: Arc<dyn HostProcess> = Arc::new(ProcessHost::new()?);
    let frontend = ConsoleFrontEnd::new(&config, Arc::clone(&host));

    let input = match frontend.start(Box::new(StdinLineSource::stdin())) {
        Ok(handle) => handle,
        Err(err) => {
            log_debug(&format!("failed to start console: {err:#}"));
            eprintln!("lanchat: {err:#}");
            host.terminate(UNEXPECTED_EXIT_STATUS);
            return Err(err);
        }
    };

    // the input thread ends the process itself; getting here means it panicked
    if input.join().is_err() {
        log_debug("console input thread panicked");
    }
    host.terminate(UNEXPECTED_EXIT_STATUS);
    Ok(())
}
