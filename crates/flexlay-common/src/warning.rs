//! Layout warnings routed through the `log` facade.
//!
//! Provides deduplication to avoid spamming the same warning on every
//! layout pass. Used by the engine to report approximated features such as
//! baseline alignment.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an approximated feature (emits once per unique message)
///
/// Returns `true` if the warning was emitted, `false` if an identical one
/// was already reported since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use flexlay_common::warning::warn_once;
///
/// let first = warn_once("flex", "align-items: baseline treated as flex-start");
/// let second = warn_once("flex", "align-items: baseline treated as flex-start");
/// assert!(first);
/// assert!(!second);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        log::warn!(target: "flexlay", "[{component}] {message}");
    }
    should_emit
}

/// Clear all recorded warnings (call when starting over with a new tree)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
