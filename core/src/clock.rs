// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time sources and the pausable game clock

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock {
    /// The current instant
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to a [`crate::Game`].
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Elapsed whole seconds that can be frozen and continued
///
/// Seconds banked before a pause are kept whole; a resumed run counts again
/// from the moment of resuming, so a fraction of a second in flight at pause
/// time is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    running_since: Option<Instant>,
    banked_secs: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or continue) counting from `now`; no-op when already running
    pub fn start(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Freeze the elapsed time at `now`
    pub fn stop(&mut self, now: Instant) {
        self.banked_secs = self.elapsed_secs(now);
        self.running_since = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Whole seconds counted as of `now`
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        let running = self
            .running_since
            .map_or(0, |since| now.saturating_duration_since(since).as_secs());
        self.banked_secs.saturating_add(running)
    }
}

/// Format seconds as `MM:SS`; minutes keep counting past 99
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
