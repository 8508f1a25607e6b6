use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, taking the inner value back if a panicking thread poisoned it.
///
/// Chat state stays usable after a collaborator panics mid-update; the poisoning is
/// logged so the crash log and the debug log line up.
pub(crate) fn lock_or_recover<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        crate::log_debug(&format!("mutex poisoned in {context}; recovering"));
        tracing::warn!(context, "recovered poisoned mutex");
        poisoned.into_inner()
    })
}
