//! The read-only reference catalog.
//!
//! A [`Catalog`] is assembled once at startup through a [`CatalogBuilder`]
//! and never mutated afterwards. Every collection keeps insertion order,
//! which is the order the presentation layer displays.
//!
//! Lookups by identifier go through an index map
//! (`BTreeMap<Id, position>`) instead of scanning the ordered vectors.

use std::collections::BTreeMap;

use incident_types::{
    Incident, IncidentId, Line, LineId, Recommendation, RecommendationId, Scenario, Station,
    StationId,
};
use tracing::debug;

use crate::error::CatalogError;

/// Immutable collections of lines, stations, incidents (per scenario), and
/// recommendations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Lines in catalog order.
    lines: Vec<Line>,
    /// Stations in catalog order.
    stations: Vec<Station>,
    /// Incident datasets keyed by scenario, each in catalog order.
    incidents: BTreeMap<Scenario, Vec<Incident>>,
    /// Recommendations in catalog order.
    recommendations: Vec<Recommendation>,
    /// Line ID -> position in `lines`.
    line_index: BTreeMap<LineId, usize>,
    /// Station ID -> position in `stations`.
    station_index: BTreeMap<StationId, usize>,
    /// Incident ID -> owning scenario and position in its dataset.
    incident_index: BTreeMap<IncidentId, (Scenario, usize)>,
    /// Recommendation ID -> position in `recommendations`.
    recommendation_index: BTreeMap<RecommendationId, usize>,
}

impl Catalog {
    /// Start building a new catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    // -------------------------------------------------------------------
    // Ordered collections
    // -------------------------------------------------------------------

    /// All lines, in catalog order.
    pub fn lines_all(&self) -> &[Line] {
        &self.lines
    }

    /// All stations, in catalog order.
    pub fn stations_all(&self) -> &[Station] {
        &self.stations
    }

    /// The incident dataset for a scenario, in catalog order.
    ///
    /// A scenario with no incidents yields an empty slice.
    pub fn incidents_for(&self, scenario: Scenario) -> &[Incident] {
        self.incidents
            .get(&scenario)
            .map_or(&[] as &[Incident], Vec::as_slice)
    }

    /// All recommendations, in catalog order.
    pub fn recommendations_all(&self) -> &[Recommendation] {
        &self.recommendations
    }

    // -------------------------------------------------------------------
    // Lookups by identifier
    // -------------------------------------------------------------------

    /// Look up a line by ID.
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.line_index
            .get(&id)
            .and_then(|&pos| self.lines.get(pos))
    }

    /// Look up a station by ID.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.station_index
            .get(&id)
            .and_then(|&pos| self.stations.get(pos))
    }

    /// Look up an incident by ID within one scenario's dataset.
    ///
    /// Returns `None` when the incident exists but belongs to a different
    /// scenario.
    pub fn incident_in(&self, scenario: Scenario, id: IncidentId) -> Option<&Incident> {
        match self.incident_index.get(&id) {
            Some(&(owner, pos)) if owner == scenario => self.incidents_for(scenario).get(pos),
            _ => None,
        }
    }

    /// The scenario whose dataset contains the given incident.
    pub fn scenario_of(&self, id: IncidentId) -> Option<Scenario> {
        self.incident_index.get(&id).map(|&(owner, _)| owner)
    }
}

/// Accumulates catalog entries and rejects duplicate identifiers.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Append a line.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateLine`] if the ID was already added.
    pub fn add_line(&mut self, line: Line) -> Result<&mut Self, CatalogError> {
        let id = line.id;
        if self.catalog.line_index.contains_key(&id) {
            return Err(CatalogError::DuplicateLine(id));
        }
        self.catalog.line_index.insert(id, self.catalog.lines.len());
        self.catalog.lines.push(line);
        Ok(self)
    }

    /// Append a station.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateStation`] if the ID was already added.
    pub fn add_station(&mut self, station: Station) -> Result<&mut Self, CatalogError> {
        let id = station.id;
        if self.catalog.station_index.contains_key(&id) {
            return Err(CatalogError::DuplicateStation(id));
        }
        self.catalog
            .station_index
            .insert(id, self.catalog.stations.len());
        self.catalog.stations.push(station);
        Ok(self)
    }

    /// Append an incident to a scenario's dataset.
    ///
    /// Line and station references are not checked against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateIncident`] if the ID was already
    /// added to any scenario.
    pub fn add_incident(
        &mut self,
        scenario: Scenario,
        incident: Incident,
    ) -> Result<&mut Self, CatalogError> {
        let id = incident.id;
        if let Some(&(existing, _)) = self.catalog.incident_index.get(&id) {
            return Err(CatalogError::DuplicateIncident { id, existing });
        }
        let dataset = self.catalog.incidents.entry(scenario).or_default();
        self.catalog.incident_index.insert(id, (scenario, dataset.len()));
        dataset.push(incident);
        Ok(self)
    }

    /// Append a recommendation.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateRecommendation`] if the ID was
    /// already added.
    pub fn add_recommendation(
        &mut self,
        recommendation: Recommendation,
    ) -> Result<&mut Self, CatalogError> {
        let id = recommendation.id;
        if self.catalog.recommendation_index.contains_key(&id) {
            return Err(CatalogError::DuplicateRecommendation(id));
        }
        self.catalog
            .recommendation_index
            .insert(id, self.catalog.recommendations.len());
        self.catalog.recommendations.push(recommendation);
        Ok(self)
    }

    /// Freeze the accumulated entries into an immutable [`Catalog`].
    pub fn build(self) -> Catalog {
        let catalog = self.catalog;
        debug!(
            lines = catalog.lines.len(),
            stations = catalog.stations.len(),
            scenarios = catalog.incidents.len(),
            incidents = catalog.incident_index.len(),
            recommendations = catalog.recommendations.len(),
            "Catalog built"
        );
        catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use incident_types::{IncidentStatus, Intent};

    use super::*;

    fn line(name: &str) -> Line {
        Line {
            id: LineId::new(),
            name: name.to_owned(),
        }
    }

    fn station(name: &str) -> Station {
        Station {
            id: StationId::new(),
            name: name.to_owned(),
            latitude: 35.68,
            longitude: 139.77,
        }
    }

    fn incident(line_id: Option<LineId>) -> Incident {
        Incident {
            id: IncidentId::new(),
            status: IncidentStatus::Caution,
            line_id,
            affected_text: "Reduced speed".to_owned(),
            related_station_ids: Vec::new(),
            summary: "Strong wind.".to_owned(),
            started_at: Utc::now(),
            source_url: None,
        }
    }

    fn recommendation(intent: Intent, title: &str) -> Recommendation {
        Recommendation {
            id: RecommendationId::new(),
            intent,
            title: title.to_owned(),
            detail: String::new(),
            actions: Vec::new(),
        }
    }

    #[test]
    fn empty_catalog_has_empty_collections() {
        let catalog = Catalog::builder().build();
        assert!(catalog.lines_all().is_empty());
        assert!(catalog.stations_all().is_empty());
        assert!(catalog.recommendations_all().is_empty());
        for scenario in Scenario::ALL {
            assert!(catalog.incidents_for(scenario).is_empty());
        }
    }

    #[test]
    fn collections_keep_insertion_order() {
        let mut builder = Catalog::builder();
        builder
            .add_line(line("B Line"))
            .unwrap()
            .add_line(line("A Line"))
            .unwrap();
        builder
            .add_recommendation(recommendation(Intent::Detour, "second"))
            .unwrap()
            .add_recommendation(recommendation(Intent::Hurry, "first"))
            .unwrap();
        let catalog = builder.build();

        let names: Vec<&str> = catalog.lines_all().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["B Line", "A Line"]);
        let titles: Vec<&str> = catalog
            .recommendations_all()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[test]
    fn lookups_by_id() {
        let l = line("Chuo Metro");
        let s = station("Chuo");
        let (line_id, station_id) = (l.id, s.id);

        let mut builder = Catalog::builder();
        builder.add_line(l).unwrap();
        builder.add_station(s).unwrap();
        let catalog = builder.build();

        assert_eq!(catalog.line(line_id).unwrap().name, "Chuo Metro");
        assert_eq!(catalog.station(station_id).unwrap().name, "Chuo");
        assert!(catalog.line(LineId::new()).is_none());
        assert!(catalog.station(StationId::new()).is_none());
    }

    #[test]
    fn duplicate_recommendation_rejected_after_others() {
        let taxi = recommendation(Intent::Hurry, "Switch to a taxi");
        let mut builder = Catalog::builder();
        builder
            .add_recommendation(taxi.clone())
            .unwrap()
            .add_recommendation(recommendation(Intent::Detour, "Check replacement buses"))
            .unwrap()
            .add_recommendation(recommendation(Intent::KillTime, "Wait at the station cafe"))
            .unwrap();

        let err = builder.add_recommendation(taxi.clone()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRecommendation(id) if id == taxi.id));

        let catalog = builder.build();
        assert_eq!(catalog.recommendations_all().len(), 3);
        assert_eq!(catalog.recommendation_index.get(&taxi.id), Some(&0));
    }

    #[test]
    fn incidents_are_scoped_to_their_scenario() {
        let first = incident(None);
        let second = incident(None);
        let (first_id, second_id) = (first.id, second.id);

        let mut builder = Catalog::builder();
        builder
            .add_incident(Scenario::Normal, first)
            .unwrap()
            .add_incident(Scenario::DelayHeavy, second)
            .unwrap();
        let catalog = builder.build();

        assert_eq!(catalog.incidents_for(Scenario::Normal).len(), 1);
        assert_eq!(catalog.incidents_for(Scenario::DelayHeavy).len(), 1);
        assert!(catalog.incidents_for(Scenario::StoppedHeavy).is_empty());

        assert!(catalog.incident_in(Scenario::Normal, first_id).is_some());
        assert!(catalog.incident_in(Scenario::DelayHeavy, first_id).is_none());
        assert_eq!(catalog.scenario_of(second_id), Some(Scenario::DelayHeavy));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let l = line("Dup");
        let s = station("Dup");
        let i = incident(None);
        let r = recommendation(Intent::KillTime, "Dup");

        let mut builder = Catalog::builder();
        builder.add_line(l.clone()).unwrap();
        builder.add_station(s.clone()).unwrap();
        builder.add_incident(Scenario::Normal, i.clone()).unwrap();
        builder.add_recommendation(r.clone()).unwrap();

        assert!(matches!(
            builder.add_line(l),
            Err(CatalogError::DuplicateLine(_))
        ));
        assert!(matches!(
            builder.add_station(s),
            Err(CatalogError::DuplicateStation(_))
        ));
        assert!(matches!(
            builder.add_incident(Scenario::StoppedHeavy, i),
            Err(CatalogError::DuplicateIncident {
                existing: Scenario::Normal,
                ..
            })
        ));
        assert!(matches!(
            builder.add_recommendation(r),
            Err(CatalogError::DuplicateRecommendation(_))
        ));
    }
}
