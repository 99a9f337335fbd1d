//! Decides when the active document has stopped changing long enough to scan.
//!
//! The host timer ticks at half the check interval and reports the current
//! document length. A length change restarts the quiet period; once a quiet
//! period of `check_interval` has elapsed the document is scanned exactly once.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ChangeDetector {
    check_interval: Duration,
    last_length: usize,
    last_change: Instant,
    scanned: bool,
}

impl ChangeDetector {
    pub fn new(check_interval: Duration, now: Instant) -> Self {
        Self {
            check_interval,
            last_length: 0,
            last_change: now,
            scanned: false,
        }
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    pub fn set_check_interval(&mut self, interval: Duration) {
        self.check_interval = interval;
    }

    /// Record the document length seen at `now`. Returns true when the
    /// document should be scanned on this tick.
    pub fn observe(&mut self, length: usize, now: Instant) -> bool {
        if length != self.last_length {
            self.last_change = now;
            self.scanned = false;
        }
        self.last_length = length;

        if self.scanned {
            return false;
        }
        now.saturating_duration_since(self.last_change) >= self.check_interval
    }

    /// Call after scanning. `length` is the document length after the
    /// rewrite, so the tool's own edit does not count as a user change.
    pub fn mark_scanned(&mut self, length: usize) {
        self.last_length = length;
        self.scanned = true;
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned
    }
}
