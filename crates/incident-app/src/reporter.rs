//! Tick observer that advances the store and logs its snapshot.
//!
//! After each clock tick, the reporter forwards the time to the
//! [`SelectionStore`], serializes a [`SelectionSnapshot`] and emits it as a
//! structured log line. When a tick limit is configured it signals the
//! shutdown channel once the limit is reached.
//!
//! [`SelectionSnapshot`]: incident_core::store::SelectionSnapshot

use chrono::{DateTime, Utc};
use incident_core::clock::TickObserver;
use incident_core::store::SelectionStore;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Observer that bridges the clock to the selection store.
pub struct SnapshotReporter {
    store: SelectionStore,
    max_ticks: u64,
    delivered: u64,
    stop: Option<oneshot::Sender<()>>,
}

impl SnapshotReporter {
    /// Wrap `store`. A `max_ticks` of 0 never signals the returned receiver.
    pub fn new(store: SelectionStore, max_ticks: u64) -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let reporter = Self {
            store,
            max_ticks,
            delivered: 0,
            stop: Some(tx),
        };
        (reporter, rx)
    }

    /// The wrapped store.
    pub const fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Ticks received so far.
    pub const fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl TickObserver for SnapshotReporter {
    fn on_tick(&mut self, now: DateTime<Utc>) {
        self.store.tick(now);
        self.delivered = self.delivered.saturating_add(1);

        match serde_json::to_string(&self.store.snapshot()) {
            Ok(json) => info!(tick = self.delivered, snapshot = %json, "Selection snapshot"),
            Err(e) => warn!(error = %e, "failed to serialize selection snapshot"),
        }

        if self.max_ticks != 0
            && self.delivered >= self.max_ticks
            && let Some(stop) = self.stop.take()
        {
            debug!(max_ticks = self.max_ticks, "Tick limit reached");
            if stop.send(()).is_err() {
                debug!("Shutdown receiver already dropped");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeDelta, TimeZone};
    use incident_catalog::demo_catalog;
    use incident_core::clock::{Clock, ManualTimeSource, TimeSource};

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    fn store() -> SelectionStore {
        let (catalog, _ids) = demo_catalog(start()).unwrap();
        SelectionStore::new(Arc::new(catalog), start())
    }

    #[test]
    fn tick_advances_store_time() {
        let (mut reporter, _rx) = SnapshotReporter::new(store(), 0);
        let later = start() + TimeDelta::minutes(1);
        reporter.on_tick(later);
        assert_eq!(reporter.store().current_time(), later);
        assert_eq!(reporter.delivered(), 1);
    }

    #[test]
    fn signals_once_limit_is_reached() {
        let (mut reporter, mut rx) = SnapshotReporter::new(store(), 2);
        reporter.on_tick(start());
        assert!(rx.try_recv().is_err());
        reporter.on_tick(start());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn clock_stops_at_tick_limit() {
        let source = Arc::new(ManualTimeSource::new(start()));
        let clock = Clock::new(
            Arc::clone(&source) as Arc<dyn TimeSource>,
            Duration::from_mins(1),
        )
        .unwrap();
        let (mut reporter, rx) = SnapshotReporter::new(store(), 3);

        let delivered = clock
            .run(&mut reporter, async {
                let _ = rx.await;
            })
            .await;

        assert_eq!(delivered, 3);
        assert_eq!(reporter.delivered(), 3);
    }
}
