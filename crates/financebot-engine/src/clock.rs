//! Time sources for the session.
//!
//! Reply scheduling reads a monotonic [`Instant`]; message timestamps read
//! wall-clock time. [`ManualClock`] moves both together so tests can step
//! through reply delays without sleeping.

use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of monotonic and wall-clock time.
pub trait Clock: Send + Sync + Debug {
    /// Monotonic time, used to decide when pending replies are due.
    fn instant(&self) -> Instant;

    /// Wall-clock time, stamped onto new messages.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Virtual time that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base_instant: Instant,
    base_timestamp: DateTime<Utc>,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Start a clock at the current real time.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Start a clock whose wall-clock reading begins at `timestamp`.
    pub fn starting_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            base_instant: Instant::now(),
            base_timestamp: timestamp,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *elapsed += by;
    }

    /// Total virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn instant(&self) -> Instant {
        self.base_instant + self.elapsed()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        // Out-of-range durations leave the wall clock where it started.
        chrono::Duration::from_std(self.elapsed())
            .ok()
            .and_then(|delta| self.base_timestamp.checked_add_signed(delta))
            .unwrap_or(self.base_timestamp)
    }
}
