//! Wall clock and periodic tick delivery.
//!
//! The clock is the only autonomous event source in the system. It reads
//! the current time from a [`TimeSource`] and, once per fixed interval,
//! hands that time to a single [`TickObserver`] (normally the
//! [`SelectionStore`](crate::store::SelectionStore)).
//!
//! # Design Principles
//!
//! - The first notification fires one full interval after [`Clock::run`]
//!   starts; the observer already holds the start time.
//! - Missed ticks (process suspended, observer too slow) are skipped, not
//!   replayed. Elapsed-time displays are stale until the next tick.
//! - Stopping is driven by the caller's shutdown future; there is no other
//!   cancellation.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ClockConfig;

/// Default interval between clock notifications.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_mins(1);

/// Errors that can occur during clock construction.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid clock configuration (e.g. zero tick interval).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Source of the current wall-clock time.
pub trait TimeSource: Send + Sync + fmt::Debug {
    /// Return the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time source that only moves when told to. Used by tests and replays.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    /// Create a manual time source frozen at `start`.
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move forward by `delta`. Saturates at the current value on overflow.
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = guard.checked_add_signed(delta) {
            *guard = next;
        }
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receives the current time once per clock interval.
pub trait TickObserver {
    /// Called with the time read at the moment the tick fired.
    fn on_tick(&mut self, now: DateTime<Utc>);
}

/// Periodic wall clock.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Where the current time comes from.
    source: Arc<dyn TimeSource>,
    /// Time between notifications.
    interval: Duration,
}

impl Clock {
    /// Create a clock reading from `source` and ticking every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `interval` is zero.
    pub fn new(source: Arc<dyn TimeSource>, interval: Duration) -> Result<Self, ClockError> {
        if interval.is_zero() {
            return Err(ClockError::InvalidConfig {
                reason: "tick interval must be at least 1 second".to_owned(),
            });
        }
        Ok(Self { source, interval })
    }

    /// Create a system clock from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the configured interval is
    /// zero.
    pub fn from_config(config: &ClockConfig) -> Result<Self, ClockError> {
        Self::new(
            Arc::new(SystemTimeSource),
            Duration::from_secs(config.tick_interval_seconds),
        )
    }

    /// Return the current time.
    pub fn now(&self) -> DateTime<Utc> {
        self.source.now()
    }

    /// Return the interval between notifications.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Notify `observer` once per interval until `shutdown` completes.
    ///
    /// Returns the number of ticks delivered.
    pub async fn run<F>(&self, observer: &mut dyn TickObserver, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let first = started.checked_add(self.interval).unwrap_or(started);
        let mut ticker = tokio::time::interval_at(first, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        let mut delivered: u64 = 0;
        info!(
            interval_secs = self.interval.as_secs(),
            "Clock started"
        );

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                scheduled = ticker.tick() => {
                    let lag = Instant::now().saturating_duration_since(scheduled);
                    if lag >= self.interval {
                        warn!(
                            lag_secs = lag.as_secs(),
                            "Clock tick delivered late, skipped ticks are not replayed"
                        );
                    }

                    let now = self.source.now();
                    observer.on_tick(now);
                    delivered = delivered.saturating_add(1);
                    debug!(tick = delivered, now = %now, "Clock tick delivered");
                }
            }
        }

        info!(ticks = delivered, "Clock stopped");
        delivered
    }
}
