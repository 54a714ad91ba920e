//! Keystroke debouncing on top of host timers.
//!
//! Zellij timers cannot be cancelled, so every keystroke arms a fresh timer
//! and the debouncer counts how many are still outstanding. Only the timer
//! that brings the count back to zero runs the filter, which means the filter
//! runs once per quiescent window rather than once per keystroke.

use std::time::Duration;

/// Counts outstanding debounce timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    pending: usize,
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window, pending: 0 }
    }

    /// Records a keystroke and returns the timer duration to schedule.
    pub fn arm(&mut self) -> Duration {
        self.pending += 1;
        self.window
    }

    /// Records an elapsed timer.
    ///
    /// Returns `true` when no newer timer is outstanding, i.e. input has been
    /// quiet for a full window. Spurious timers with nothing pending return
    /// `false`.
    pub fn fire(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        self.pending == 0
    }
}
