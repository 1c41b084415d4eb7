//! The selection store: the single source of truth for what is "current."
//!
//! [`SelectionStore`] owns the only mutable state in the system, a
//! [`SelectionState`] record, and keeps the selected station, line, and
//! incident consistent with each other. It is constructed explicitly and
//! passed by reference to whoever presents it; mutation requires `&mut`, so
//! there is exactly one writer at a time.
//!
//! # Consistency rules
//!
//! - Selecting an incident also selects its line and its first related
//!   station, overriding any earlier manual choice.
//! - Selecting a station touches nothing else.
//! - Switching scenario keeps the raw selections. The resolved incident
//!   falls back to the new dataset's first incident; the raw station and
//!   line stay as last set.
//!
//! No operation fails. Absence is `None`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use incident_catalog::Catalog;
use incident_types::{
    Incident, IncidentId, IncidentStatus, Intent, Line, LineId, Recommendation, Scenario, Station,
    StationId,
};
use serde::Serialize;
use tracing::debug;

use crate::clock::TickObserver;
use crate::config::StoreConfig;
use crate::derive;

/// The mutable selection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// Station chosen directly or through an incident.
    pub selected_station_id: Option<StationId>,
    /// Line of the last selected incident.
    pub selected_line_id: Option<LineId>,
    /// Last selected incident. May belong to a scenario other than the
    /// active one.
    pub selected_incident_id: Option<IncidentId>,
    /// Active intent.
    pub selected_intent: Intent,
    /// Active scenario.
    pub active_scenario: Scenario,
    /// Time of the last clock tick (or of construction).
    pub current_time: DateTime<Utc>,
}

impl SelectionState {
    /// Startup state: nothing selected, `hurry` intent, `normal` scenario.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            selected_station_id: None,
            selected_line_id: None,
            selected_incident_id: None,
            selected_intent: Intent::Hurry,
            active_scenario: Scenario::Normal,
            current_time: now,
        }
    }
}

/// Owns the selection state and enforces cross-entity consistency.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    catalog: Arc<Catalog>,
    state: SelectionState,
}

impl SelectionStore {
    /// Create a store with the startup selection state.
    pub const fn new(catalog: Arc<Catalog>, now: DateTime<Utc>) -> Self {
        Self {
            catalog,
            state: SelectionState::new(now),
        }
    }

    /// Create a store whose initial scenario and intent come from
    /// configuration.
    pub const fn from_config(catalog: Arc<Catalog>, now: DateTime<Utc>, config: &StoreConfig) -> Self {
        let mut state = SelectionState::new(now);
        state.active_scenario = config.initial_scenario;
        state.selected_intent = config.initial_intent;
        Self { catalog, state }
    }

    /// The catalog this store resolves against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The raw selection state.
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Raw selected station ID.
    pub const fn selected_station_id(&self) -> Option<StationId> {
        self.state.selected_station_id
    }

    /// Raw selected line ID.
    pub const fn selected_line_id(&self) -> Option<LineId> {
        self.state.selected_line_id
    }

    /// Raw selected incident ID.
    pub const fn selected_incident_id(&self) -> Option<IncidentId> {
        self.state.selected_incident_id
    }

    /// Active intent.
    pub const fn intent(&self) -> Intent {
        self.state.selected_intent
    }

    /// Active scenario.
    pub const fn scenario(&self) -> Scenario {
        self.state.active_scenario
    }

    /// Time of the last tick.
    pub const fn current_time(&self) -> DateTime<Utc> {
        self.state.current_time
    }

    // -------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------

    /// Select an incident, along with its line and first related station.
    ///
    /// The line and station are overwritten even when unset on the
    /// incident.
    pub fn select_incident(&mut self, incident: &Incident) {
        self.state.selected_incident_id = Some(incident.id);
        self.state.selected_line_id = incident.line_id;
        self.state.selected_station_id = incident.related_station_ids.first().copied();
        debug!(
            incident = %incident.id,
            line = ?self.state.selected_line_id,
            station = ?self.state.selected_station_id,
            "Incident selected"
        );
    }

    /// Select a station without touching the line or incident.
    pub fn select_station(&mut self, station_id: StationId) {
        self.state.selected_station_id = Some(station_id);
        debug!(station = %station_id, "Station selected");
    }

    /// Set the active intent.
    pub fn set_intent(&mut self, intent: Intent) {
        self.state.selected_intent = intent;
        debug!(?intent, "Intent set");
    }

    /// Switch the active scenario.
    ///
    /// Raw selections are kept. When the selected incident is not part of
    /// the new dataset, [`resolved_incident`](Self::resolved_incident)
    /// falls back to the dataset's first incident.
    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.state.active_scenario = scenario;
        let selected_in = self
            .state
            .selected_incident_id
            .and_then(|id| self.catalog.scenario_of(id));
        let stale =
            self.state.selected_incident_id.is_some() && selected_in != Some(scenario);
        debug!(
            ?scenario,
            stale_incident = stale,
            ?selected_in,
            "Scenario set"
        );
    }

    /// Record the time of a clock tick.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.state.current_time = now;
        debug!(now = %now, "Store ticked");
    }

    // -------------------------------------------------------------------
    // Resolved reads
    // -------------------------------------------------------------------

    /// Incidents of the active scenario, in catalog order.
    pub fn incidents(&self) -> &[Incident] {
        derive::incidents_for_scenario(&self.catalog, self.state.active_scenario)
    }

    /// The effective incident: the selection if it is in the active
    /// dataset, else the dataset's first incident, else `None`.
    pub fn resolved_incident(&self) -> Option<&Incident> {
        derive::selected_incident(
            &self.catalog,
            self.state.active_scenario,
            self.state.selected_incident_id,
        )
    }

    /// The selected station, if set and in the catalog.
    pub fn resolved_station(&self) -> Option<&Station> {
        self.state
            .selected_station_id
            .and_then(|id| self.catalog.station(id))
    }

    /// The selected line, if set and in the catalog.
    pub fn resolved_line(&self) -> Option<&Line> {
        self.state
            .selected_line_id
            .and_then(|id| self.catalog.line(id))
    }

    /// Recommendations for the active intent, in catalog order.
    pub fn recommendations(&self) -> Vec<&Recommendation> {
        derive::recommendations_for_intent(&self.catalog, self.state.selected_intent)
    }

    /// Elapsed-time label for an incident as of the last tick.
    pub fn elapsed_label(&self, incident: &Incident) -> String {
        derive::elapsed_label(incident.started_at, self.state.current_time)
    }

    /// A serializable projection of everything the home screen shows.
    pub fn snapshot(&self) -> SelectionSnapshot {
        let incident = self.resolved_incident().map(|incident| IncidentCard {
            id: incident.id,
            status: incident.status,
            line_name: derive::line_name_for(&self.catalog, incident).to_owned(),
            affected_text: incident.affected_text.clone(),
            summary: incident.summary.clone(),
            elapsed: self.elapsed_label(incident),
            source_url: incident.source_url.clone(),
        });

        SelectionSnapshot {
            scenario: self.state.active_scenario,
            intent: self.state.selected_intent,
            now: self.state.current_time,
            station_name: self.resolved_station().map(|s| s.name.clone()),
            line_name: self.resolved_line().map(|l| l.name.clone()),
            incident,
            incident_count: self.incidents().len(),
            recommendations: self
                .recommendations()
                .into_iter()
                .map(|rec| rec.title.clone())
                .collect(),
        }
    }
}

impl TickObserver for SelectionStore {
    fn on_tick(&mut self, now: DateTime<Utc>) {
        self.tick(now);
    }
}

/// Point-in-time view of the store for presentation or logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    /// Active scenario.
    pub scenario: Scenario,
    /// Active intent.
    pub intent: Intent,
    /// Time of the last tick.
    pub now: DateTime<Utc>,
    /// Resolved station name.
    pub station_name: Option<String>,
    /// Resolved line name.
    pub line_name: Option<String>,
    /// The resolved incident.
    pub incident: Option<IncidentCard>,
    /// Number of incidents in the active dataset.
    pub incident_count: usize,
    /// Titles of the recommendations for the active intent.
    pub recommendations: Vec<String>,
}

/// Display fields of the resolved incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentCard {
    /// Incident ID.
    pub id: IncidentId,
    /// Operating status.
    pub status: IncidentStatus,
    /// Line name, or the unknown-line placeholder.
    pub line_name: String,
    /// Affected segment.
    pub affected_text: String,
    /// Summary text.
    pub summary: String,
    /// Time since the incident started.
    pub elapsed: String,
    /// Operator notice URL.
    pub source_url: Option<String>,
}
