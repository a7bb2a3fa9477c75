use std::time::{Duration, Instant};

use crate::config::{DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};

/// Fixed-interval tick scheduler with an explicit start/stop lifecycle.
///
/// The ticker never fires while stopped. Once started it fires at most once
/// per `interval` each time it is polled; missed intervals are not replayed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last_fire: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    /// Creates a stopped ticker from a millisecond setting, clamped to the minimum.
    #[must_use]
    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms.max(MIN_TICK_INTERVAL_MS)))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_fire.is_some()
    }

    /// Arms the ticker; the first tick is due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        if self.last_fire.is_none() {
            self.last_fire = Some(now);
        }
    }

    /// Cancels any further ticks until the next `start`.
    pub fn stop(&mut self) {
        self.last_fire = None;
    }

    /// Returns true when a tick is due at `now`, re-arming for the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last_fire) = self.last_fire else {
            return false;
        };

        if now.saturating_duration_since(last_fire) < self.interval {
            return false;
        }

        self.last_fire = Some(now);
        true
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TICK_INTERVAL_MS)
    }
}
