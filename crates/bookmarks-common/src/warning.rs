//! Recoverable-input warnings.
//!
//! Readers and writers never fail on content they can skip or degrade; they
//! report it here instead. Each distinct warning is printed to stderr once,
//! in yellow, and kept until [`clear_warnings`] so callers can inspect what
//! a read or write reported.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Warning {
    /// Reporting component, e.g. `"Netscape Parser"`.
    pub component: String,
    /// What was skipped or degraded.
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.component, self.message)
    }
}

static REPORTED: Mutex<BTreeSet<Warning>> = Mutex::new(BTreeSet::new());

fn reported() -> MutexGuard<'static, BTreeSet<Warning>> {
    REPORTED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Report a recoverable problem. Repeats of the same warning are recorded
/// once and printed once.
///
/// # Example
/// ```
/// use bookmarks_common::warning::{warn_once, was_warned};
///
/// warn_once("Netscape Parser", "ignoring embedded icon: not base64");
/// assert!(was_warned("Netscape Parser", "ignoring embedded icon: not base64"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let warning = Warning {
        component: component.to_string(),
        message: message.to_string(),
    };
    let line = warning.to_string();
    if reported().insert(warning) {
        eprintln!("{YELLOW}bookmarks {line}{RESET}");
    }
}

/// Forget every recorded warning (call before reading a new document).
pub fn clear_warnings() {
    reported().clear();
}

/// True if this warning was reported since the last [`clear_warnings`].
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    reported()
        .iter()
        .any(|warning| warning.component == component && warning.message == message)
}

/// Every warning recorded since the last [`clear_warnings`], sorted.
#[must_use]
pub fn warnings() -> Vec<Warning> {
    reported().iter().cloned().collect()
}
