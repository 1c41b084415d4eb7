//! Catalog entity structs: lines, stations, incidents, and recommendations.
//!
//! All of these are immutable once the catalog is built. The selection
//! store only ever holds their identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{IncidentStatus, Intent, RecommendationAction};
use crate::ids::{IncidentId, LineId, RecommendationId, StationId};

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// A transit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Line {
    /// Unique line identifier.
    pub id: LineId,
    /// Display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

/// A station with its map position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Station {
    /// Unique station identifier.
    pub id: StationId,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Incident
// ---------------------------------------------------------------------------

/// A disruption on (part of) a line.
///
/// Belongs to exactly one scenario dataset. `related_station_ids` is ordered;
/// the first entry is the station that gets selected along with the incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Incident {
    /// Unique incident identifier.
    pub id: IncidentId,
    /// Operating status on the affected segment.
    pub status: IncidentStatus,
    /// The affected line, if the incident is attributed to one.
    pub line_id: Option<LineId>,
    /// Free-text description of the affected segment.
    pub affected_text: String,
    /// Stations involved, most relevant first.
    pub related_station_ids: Vec<StationId>,
    /// Free-text summary of the cause and impact.
    pub summary: String,
    /// When the incident began.
    pub started_at: DateTime<Utc>,
    /// Operator notice the incident was sourced from.
    pub source_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// A canned suggestion shown for one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Recommendation {
    /// Unique recommendation identifier.
    pub id: RecommendationId,
    /// The intent this suggestion answers.
    pub intent: Intent,
    /// Card title.
    pub title: String,
    /// Card body text.
    pub detail: String,
    /// Actions offered on the card, in display order.
    pub actions: Vec<RecommendationAction>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn incident_json_shape() {
        let station = StationId::new();
        let incident = Incident {
            id: IncidentId::new(),
            status: IncidentStatus::Delayed,
            line_id: None,
            affected_text: "Central to Harbor Front, 10-15 min late".to_owned(),
            related_station_ids: vec![station],
            summary: "Safety check in the station.".to_owned(),
            started_at: Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap(),
            source_url: None,
        };

        let json = serde_json::to_value(&incident).unwrap();
        assert_eq!(json["status"], "delayed");
        assert!(json["line_id"].is_null());
        assert_eq!(json["related_station_ids"][0], station.to_string());

        let restored: Incident = serde_json::from_value(json).unwrap();
        assert_eq!(restored, incident);
    }

    #[test]
    fn recommendation_preserves_action_order() {
        let rec = Recommendation {
            id: RecommendationId::new(),
            intent: Intent::Hurry,
            title: "Switch to a taxi".to_owned(),
            detail: "Taxi rank in front of the station.".to_owned(),
            actions: vec![
                RecommendationAction::OpenExternal("https://example.com/taxi".to_owned()),
                RecommendationAction::ShowMap,
                RecommendationAction::ShowFact,
            ],
        };

        let json = serde_json::to_string(&rec).unwrap();
        let restored: Recommendation = serde_json::from_str(&json).unwrap();
        let keys: Vec<String> = restored.actions.iter().map(RecommendationAction::key).collect();
        assert_eq!(keys, ["external_https://example.com/taxi", "map", "fact"]);
    }
}
