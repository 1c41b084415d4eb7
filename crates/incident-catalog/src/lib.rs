//! Immutable reference catalog for the Incident Solver selection store.
//!
//! The catalog is the read-only side of the system: lines, stations,
//! incident datasets per scenario, and canned recommendations. It is built
//! once at startup and shared by reference; nothing mutates it afterwards.
//!
//! # Modules
//!
//! - [`catalog`] -- [`Catalog`] with ordered collections and indexed
//!   lookups, plus the [`CatalogBuilder`] that assembles it.
//! - [`demo`] -- The built-in demo dataset.
//! - [`error`] -- Error types for catalog construction.

pub mod catalog;
pub mod demo;
pub mod error;

// Re-export primary types at crate root.
pub use catalog::{Catalog, CatalogBuilder};
pub use demo::{DemoIds, demo_catalog};
pub use error::CatalogError;
