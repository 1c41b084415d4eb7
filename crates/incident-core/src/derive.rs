//! Pure derivations from the catalog and the current selection.
//!
//! Nothing here holds state. Every function recomputes its answer from the
//! [`Catalog`] and the arguments on each call, so the results are snapshots:
//! callers re-query after any mutation or clock tick instead of caching.
//!
//! Absence is never an error. An unknown ID, an empty dataset, or a filter
//! with no matches all come back as `None` or an empty `Vec`.

use chrono::{DateTime, Utc};
use incident_catalog::Catalog;
use incident_types::{Incident, IncidentId, Intent, Recommendation, Scenario, Station};

/// Shown in place of a line name when an incident has no line, or its line
/// is not in the catalog.
pub const UNKNOWN_LINE_LABEL: &str = "Unknown line";

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// The incident dataset of a scenario, in catalog order.
pub fn incidents_for_scenario(catalog: &Catalog, scenario: Scenario) -> &[Incident] {
    catalog.incidents_for(scenario)
}

/// Resolve the effective incident for a scenario.
///
/// Returns the selected incident when it belongs to the scenario's dataset.
/// Otherwise (nothing selected, or the selection belongs to another
/// scenario) falls back to the dataset's first incident, or `None` when the
/// dataset is empty.
pub fn selected_incident(
    catalog: &Catalog,
    scenario: Scenario,
    selected: Option<IncidentId>,
) -> Option<&Incident> {
    selected
        .and_then(|id| catalog.incident_in(scenario, id))
        .or_else(|| catalog.incidents_for(scenario).first())
}

/// Recommendations for one intent, in catalog order.
pub fn recommendations_for_intent(catalog: &Catalog, intent: Intent) -> Vec<&Recommendation> {
    catalog
        .recommendations_all()
        .iter()
        .filter(|rec| rec.intent == intent)
        .collect()
}

/// Whole minutes from `started_at` to `now`.
///
/// A `now` earlier than `started_at` (clock skew) counts as zero.
pub fn elapsed_minutes(started_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let seconds = u64::try_from(now.signed_duration_since(started_at).num_seconds()).unwrap_or(0);
    seconds.checked_div(SECONDS_PER_MINUTE).unwrap_or(0)
}

/// Human-readable time since an incident started.
///
/// `"M minutes"` below one hour, `"H hours M minutes"` from one hour on.
/// Negative spans are clamped to `"0 minutes"`.
pub fn elapsed_label(started_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let total = elapsed_minutes(started_at, now);
    let hours = total.checked_div(MINUTES_PER_HOUR).unwrap_or(0);
    let minutes = total.checked_rem(MINUTES_PER_HOUR).unwrap_or(0);
    if hours == 0 {
        format!("{minutes} minutes")
    } else {
        format!("{hours} hours {minutes} minutes")
    }
}

/// Display name of an incident's line, or [`UNKNOWN_LINE_LABEL`].
pub fn line_name_for<'a>(catalog: &'a Catalog, incident: &Incident) -> &'a str {
    incident
        .line_id
        .and_then(|id| catalog.line(id))
        .map_or(UNKNOWN_LINE_LABEL, |line| line.name.as_str())
}

/// Stations whose name contains `query`, ignoring case.
///
/// A query that is empty after trimming whitespace matches every station.
/// Otherwise the query is matched as given, surrounding whitespace
/// included. Results keep catalog order.
pub fn search_stations<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Station> {
    if query.trim().is_empty() {
        return catalog.stations_all().iter().collect();
    }
    let needle = query.to_lowercase();
    catalog
        .stations_all()
        .iter()
        .filter(|station| station.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use incident_catalog::demo_catalog;
    use incident_types::{IncidentStatus, Line, LineId};

    use super::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    fn catalog() -> Catalog {
        demo_catalog(base()).unwrap().0
    }

    #[test]
    fn elapsed_label_under_an_hour() {
        let now = base();
        assert_eq!(elapsed_label(now - TimeDelta::seconds(125), now), "2 minutes");
        assert_eq!(elapsed_label(now - TimeDelta::seconds(59), now), "0 minutes");
        assert_eq!(elapsed_label(now, now), "0 minutes");
        assert_eq!(elapsed_label(now - TimeDelta::minutes(59), now), "59 minutes");
    }

    #[test]
    fn elapsed_label_with_hours() {
        let now = base();
        assert_eq!(elapsed_label(now - TimeDelta::minutes(60), now), "1 hours 0 minutes");
        assert_eq!(
            elapsed_label(now - TimeDelta::minutes(125), now),
            "2 hours 5 minutes"
        );
    }

    #[test]
    fn elapsed_label_clamps_future_start() {
        let now = base();
        assert_eq!(elapsed_label(now + TimeDelta::minutes(10), now), "0 minutes");
        assert_eq!(elapsed_minutes(now + TimeDelta::seconds(1), now), 0);
    }

    #[test]
    fn elapsed_minutes_is_monotonic() {
        let started = base();
        let mut previous = 0;
        for step in 0..400 {
            let now = started + TimeDelta::seconds(step * 17);
            let minutes = elapsed_minutes(started, now);
            assert!(minutes >= previous);
            previous = minutes;
        }
    }

    #[test]
    fn recommendations_are_filtered_in_catalog_order() {
        let catalog = catalog();
        for intent in Intent::ALL {
            let recs = recommendations_for_intent(&catalog, intent);
            assert!(recs.iter().all(|r| r.intent == intent));

            let expected: Vec<&Recommendation> = catalog
                .recommendations_all()
                .iter()
                .filter(|r| r.intent == intent)
                .collect();
            assert_eq!(recs, expected);
            assert_eq!(recs, recommendations_for_intent(&catalog, intent));
        }
    }

    #[test]
    fn no_recommendations_is_empty_not_error() {
        let empty = Catalog::builder().build();
        assert!(recommendations_for_intent(&empty, Intent::Detour).is_empty());
    }

    #[test]
    fn selected_incident_prefers_selection_in_scenario() {
        let catalog = catalog();
        let second = catalog.incidents_for(Scenario::Normal).get(1).unwrap();
        let resolved = selected_incident(&catalog, Scenario::Normal, Some(second.id)).unwrap();
        assert_eq!(resolved.id, second.id);
    }

    #[test]
    fn selected_incident_falls_back_to_first() {
        let catalog = catalog();
        let foreign = catalog.incidents_for(Scenario::DelayHeavy).get(1).unwrap();
        let first = catalog.incidents_for(Scenario::Normal).first().unwrap();

        let resolved = selected_incident(&catalog, Scenario::Normal, Some(foreign.id)).unwrap();
        assert_eq!(resolved.id, first.id);

        let resolved = selected_incident(&catalog, Scenario::Normal, None).unwrap();
        assert_eq!(resolved.id, first.id);
    }

    #[test]
    fn selected_incident_empty_dataset_is_none() {
        let empty = Catalog::builder().build();
        assert!(selected_incident(&empty, Scenario::Normal, None).is_none());
        assert!(incidents_for_scenario(&empty, Scenario::StoppedHeavy).is_empty());
    }

    #[test]
    fn line_name_resolves_or_uses_placeholder() {
        let line = Line {
            id: LineId::new(),
            name: "Bayside Liner".to_owned(),
        };
        let mut incident = Incident {
            id: IncidentId::new(),
            status: IncidentStatus::Delayed,
            line_id: Some(line.id),
            affected_text: String::new(),
            related_station_ids: Vec::new(),
            summary: String::new(),
            started_at: base(),
            source_url: None,
        };
        let mut builder = Catalog::builder();
        builder.add_line(line).unwrap();
        let catalog = builder.build();

        assert_eq!(line_name_for(&catalog, &incident), "Bayside Liner");

        incident.line_id = None;
        assert_eq!(line_name_for(&catalog, &incident), UNKNOWN_LINE_LABEL);

        incident.line_id = Some(LineId::new());
        assert_eq!(line_name_for(&catalog, &incident), UNKNOWN_LINE_LABEL);
    }

    #[test]
    fn search_matches_case_insensitively() {
        let catalog = catalog();
        let names: Vec<&str> = search_stations(&catalog, "HAMA")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Kitahama", "Minamihama"]);
    }

    #[test]
    fn padded_query_is_matched_verbatim() {
        let catalog = catalog();
        assert!(search_stations(&catalog, " Chuo").is_empty());
        assert!(search_stations(&catalog, "Chuo ").is_empty());
        let names: Vec<&str> = search_stations(&catalog, "Airport Gate")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Airport Gate"]);
    }

    #[test]
    fn blank_search_returns_every_station() {
        let catalog = catalog();
        assert_eq!(search_stations(&catalog, "   ").len(), 10);
        assert_eq!(search_stations(&catalog, "").len(), 10);
        assert!(search_stations(&catalog, "Osaka").is_empty());
    }
}
