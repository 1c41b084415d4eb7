//! Error types for the demo binary.
//!
//! [`AppError`] wraps every failure mode during startup so `main` can
//! propagate with `?`. Once the clock is running nothing can fail.

/// Top-level error for the demo binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: incident_core::config::ConfigError,
    },

    /// Clock construction failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: incident_core::clock::ClockError,
    },

    /// Catalog construction failed.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: incident_catalog::CatalogError,
    },

    /// Snapshot serialization failed.
    #[error("snapshot serialization failed: {source}")]
    Snapshot {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
