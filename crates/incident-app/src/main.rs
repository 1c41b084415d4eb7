//! Demo binary for the Incident Solver selection store.
//!
//! Wires the demo catalog, the selection store, and the wall clock
//! together, walks through a short scripted selection session, and then
//! keeps the store's clock running until Ctrl-C or the configured tick
//! limit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `incident-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the wall clock from the clock config
//! 4. Build the demo catalog relative to the current time
//! 5. Create the selection store from the store config
//! 6. Run the scripted selection session
//! 7. Run the clock loop
//! 8. Log the result

mod error;
mod reporter;

use std::future::Future;
use std::io;
use std::path::Path;
use std::sync::Arc;

use incident_catalog::demo_catalog;
use incident_core::clock::Clock;
use incident_core::config::{LogFormat, LoggingConfig, SolverConfig};
use incident_core::derive;
use incident_core::map;
use incident_core::store::SelectionStore;
use incident_types::Intent;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::reporter::SnapshotReporter;

/// Name of the configuration file, relative to the working directory.
const CONFIG_FILE: &str = "incident-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, clock, or catalog setup fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so report where the
    //    config came from after initialization.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(from_file, "incident-app starting");
    info!(
        tick_interval_seconds = config.clock.tick_interval_seconds,
        initial_scenario = ?config.store.initial_scenario,
        initial_intent = ?config.store.initial_intent,
        max_ticks = config.demo.max_ticks,
        "Configuration loaded"
    );

    // 3. Create the wall clock.
    let clock = Clock::from_config(&config.clock)?;
    let now = clock.now();

    // 4. Build the demo catalog.
    let (catalog, _ids) = demo_catalog(now)?;
    info!(
        lines = catalog.lines_all().len(),
        stations = catalog.stations_all().len(),
        recommendations = catalog.recommendations_all().len(),
        "Demo catalog built"
    );

    // 5. Create the selection store.
    let mut store = SelectionStore::from_config(Arc::new(catalog), now, &config.store);

    // 6. Scripted selection session.
    run_script(&mut store)?;

    // 7. Run the clock until Ctrl-C or the tick limit.
    let (mut reporter, limit_reached) = SnapshotReporter::new(store, config.demo.max_ticks);
    let shutdown = wait_for_stop(tokio::signal::ctrl_c(), limit_reached);
    let ticks = clock.run(&mut reporter, shutdown).await;

    // 8. Log the result.
    info!(
        ticks,
        final_time = %reporter.store().current_time(),
        "incident-app shutdown complete"
    );

    Ok(())
}

/// Resolve on Ctrl-C or when the tick limit is reached.
///
/// If the Ctrl-C handler cannot be installed, only the tick limit stops
/// the clock.
async fn wait_for_stop<C>(ctrl_c: C, limit_reached: oneshot::Receiver<()>)
where
    C: Future<Output = io::Result<()>>,
{
    let interrupted = async {
        if let Err(e) = ctrl_c.await {
            warn!(error = %e, "failed to listen for Ctrl-C, running until the tick limit");
            std::future::pending::<()>().await;
        }
    };
    tokio::select! {
        () = interrupted => {}
        _ = limit_reached => {}
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

/// Load configuration from [`CONFIG_FILE`], falling back to defaults when
/// the file does not exist.
///
/// Returns the configuration and whether it was read from disk.
fn load_config() -> Result<(SolverConfig, bool), AppError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok((SolverConfig::from_file(config_path)?, true))
    } else {
        let mut config = SolverConfig::default();
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok((config, false))
    }
}

/// Walk through a typical session: open an incident, change intent, then
/// pick a station from search results.
fn run_script(store: &mut SelectionStore) -> Result<(), AppError> {
    info!(snapshot = %serde_json::to_string(&store.snapshot())?, "Initial selection");

    if let Some(incident) = store.incidents().get(1).cloned() {
        store.select_incident(&incident);
        let pinned = map::related_stations(store.catalog(), &incident);
        let region = map::map_region(&pinned);
        info!(
            line = derive::line_name_for(store.catalog(), &incident),
            elapsed = %store.elapsed_label(&incident),
            pinned = pinned.len(),
            center_latitude = region.center_latitude,
            center_longitude = region.center_longitude,
            "Incident opened"
        );
    }

    store.set_intent(Intent::Detour);
    for rec in store.recommendations() {
        info!(title = %rec.title, actions = rec.actions.len(), "Recommendation");
    }

    let found = derive::search_stations(store.catalog(), "hama")
        .first()
        .map(|station| station.id);
    if let Some(station_id) = found {
        store.select_station(station_id);
    }

    info!(snapshot = %serde_json::to_string(&store.snapshot())?, "Scripted selection");
    Ok(())
}
