//! Hierarchical progress logging.
//!
//! Long scanner runs report what they are doing as an indented tree of
//! messages: `enter` opens a nesting level, `emit` writes a message at the
//! current level, `leave` closes it. Messages go through the `log` crate, so
//! nothing is printed unless a logger is installed.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Indented, leveled progress messages.
///
/// Verbosity follows the scanner convention: lower numbers are more
/// important. Levels up to 2 are logged at `info`, 3 and 4 at `debug`,
/// anything above at `trace`.
#[derive(Debug, Default)]
pub struct ProgressLog {
    depth: AtomicUsize,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    pub fn enter(&self) {
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    pub fn leave(&self) {
        // never underflow on unbalanced calls
        let _ = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| d.checked_sub(1));
    }

    /// Enter a level that is left again when the guard is dropped.
    pub fn scope(&self) -> ProgressScope<'_> {
        self.enter();
        ProgressScope { log: self }
    }

    pub fn emit(&self, category: &str, details: &str, verbosity: u8) {
        self.emit_at(self.depth(), category, details, verbosity);
    }

    /// Emit at an explicit depth, for callers that track nesting themselves.
    pub fn emit_at(&self, depth: usize, category: &str, details: &str, verbosity: u8) {
        let level = match verbosity {
            0..=2 => log::Level::Info,
            3..=4 => log::Level::Debug,
            _ => log::Level::Trace,
        };
        if !log::log_enabled!(level) {
            return;
        }
        let indent = "  ".repeat(depth);
        if details.is_empty() {
            log::log!(level, "{}{}", indent, category);
        } else {
            log::log!(level, "{}{}: {}", indent, category, details);
        }
    }
}

/// Guard returned by [`ProgressLog::scope`].
pub struct ProgressScope<'a> {
    log: &'a ProgressLog,
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.log.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_leave_nesting() {
        let progress = ProgressLog::new();
        progress.enter();
        progress.enter();
        assert_eq!(progress.depth(), 2);
        progress.leave();
        assert_eq!(progress.depth(), 1);
        progress.leave();
        progress.leave();
        assert_eq!(progress.depth(), 0);
    }

    #[test]
    fn test_scope_leaves_on_drop() {
        let progress = ProgressLog::new();
        {
            let _scope = progress.scope();
            assert_eq!(progress.depth(), 1);
            progress.emit("inside", "", 5);
        }
        assert_eq!(progress.depth(), 0);
    }
}
