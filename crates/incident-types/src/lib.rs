//! Shared type definitions for the Incident Solver selection store.
//!
//! This crate is the single source of truth for the catalog entities and
//! enumerations used across the workspace. Types flow downstream to
//! `TypeScript` via `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Incident status, intent, scenario, recommendation actions
//! - [`structs`] -- Lines, stations, incidents, recommendations

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{IncidentStatus, Intent, RecommendationAction, Scenario};
pub use ids::{IncidentId, LineId, RecommendationId, StationId};
pub use structs::{Incident, Line, Recommendation, Station};
