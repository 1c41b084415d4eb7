//! Error types for the `incident-catalog` crate.
//!
//! Only catalog construction can fail. Once built, every lookup resolves to
//! a value or to `None`.

use incident_types::{IncidentId, LineId, RecommendationId, Scenario, StationId};

/// Errors that can occur while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A line with the same ID was already added.
    #[error("duplicate line id: {0}")]
    DuplicateLine(LineId),

    /// A station with the same ID was already added.
    #[error("duplicate station id: {0}")]
    DuplicateStation(StationId),

    /// An incident with the same ID was already added to some scenario.
    ///
    /// Incident IDs are unique across all scenario datasets because an
    /// incident belongs to exactly one dataset.
    #[error("duplicate incident id {id} (already in scenario {existing:?})")]
    DuplicateIncident {
        /// The repeated incident ID.
        id: IncidentId,
        /// The scenario that already owns it.
        existing: Scenario,
    },

    /// A recommendation with the same ID was already added.
    #[error("duplicate recommendation id: {0}")]
    DuplicateRecommendation(RecommendationId),
}
