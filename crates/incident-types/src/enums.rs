//! Enumeration types for the incident selection store.
//!
//! Serialized names use camelCase (`killTime`, `delayHeavy`) so that the
//! wire form matches what the presentation layer already stores in its
//! pickers and settings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Incident status
// ---------------------------------------------------------------------------

/// Operating status of a line segment affected by an incident.
///
/// Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum IncidentStatus {
    /// Service suspended on the affected segment.
    Stopped,
    /// Trains running behind schedule.
    Delayed,
    /// Reduced speed or thinned-out service.
    Caution,
    /// Normal operation.
    Normal,
}

impl IncidentStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 4] = [Self::Stopped, Self::Delayed, Self::Caution, Self::Normal];

    /// Short display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Delayed => "Delayed",
            Self::Caution => "Caution",
            Self::Normal => "Normal",
        }
    }
}

// ---------------------------------------------------------------------------
// User intent
// ---------------------------------------------------------------------------

/// What the user wants to do about a disruption.
///
/// Used to filter the recommendation catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Intent {
    /// Get there as fast as possible.
    #[default]
    Hurry,
    /// Take another route even if it is slower.
    Detour,
    /// Wait it out nearby.
    KillTime,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Self; 3] = [Self::Hurry, Self::Detour, Self::KillTime];

    /// Short display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hurry => "In a hurry",
            Self::Detour => "Want a detour",
            Self::KillTime => "Can kill time",
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// One of the canned incident datasets used to demo different severity mixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Scenario {
    /// A typical day: one stoppage, one delay, one caution.
    #[default]
    Normal,
    /// Mostly delays.
    DelayHeavy,
    /// Mostly stoppages.
    StoppedHeavy,
}

impl Scenario {
    /// Every scenario, in declaration order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::DelayHeavy, Self::StoppedHeavy];

    /// Short display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::DelayHeavy => "Many delays",
            Self::StoppedHeavy => "Many stoppages",
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendation actions
// ---------------------------------------------------------------------------

/// Something the user can do from a recommendation card.
///
/// A recommendation carries an ordered list of these; the order is the
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "url", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum RecommendationAction {
    /// Jump to the map centered on the related stations.
    ShowMap,
    /// Open the fact sheet for the current incident.
    ShowFact,
    /// Open an external page.
    OpenExternal(String),
}

impl RecommendationAction {
    /// Stable identity string, unique within a recommendation's action list.
    ///
    /// External links are keyed by their URL so two links on one card stay
    /// distinguishable.
    pub fn key(&self) -> String {
        match self {
            Self::ShowMap => "map".to_owned(),
            Self::ShowFact => "fact".to_owned(),
            Self::OpenExternal(url) => format!("external_{url}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_selection() {
        assert_eq!(Intent::default(), Intent::Hurry);
        assert_eq!(Scenario::default(), Scenario::Normal);
    }

    #[test]
    fn serde_uses_camel_case_names() {
        assert_eq!(serde_json::to_string(&Intent::KillTime).unwrap(), "\"killTime\"");
        assert_eq!(
            serde_json::to_string(&Scenario::StoppedHeavy).unwrap(),
            "\"stoppedHeavy\""
        );
        let parsed: Scenario = serde_json::from_str("\"delayHeavy\"").unwrap();
        assert_eq!(parsed, Scenario::DelayHeavy);
    }

    #[test]
    fn all_lists_every_variant_once() {
        assert_eq!(IncidentStatus::ALL.len(), 4);
        assert_eq!(Intent::ALL.first(), Some(&Intent::Hurry));
        assert_eq!(Scenario::ALL.last(), Some(&Scenario::StoppedHeavy));
    }

    #[test]
    fn action_keys() {
        assert_eq!(RecommendationAction::ShowMap.key(), "map");
        assert_eq!(RecommendationAction::ShowFact.key(), "fact");
        assert_eq!(
            RecommendationAction::OpenExternal("https://example.com/bus".to_owned()).key(),
            "external_https://example.com/bus"
        );
    }

    #[test]
    fn external_action_serializes_with_url() {
        let action = RecommendationAction::OpenExternal("https://example.com/taxi".to_owned());
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "openExternal");
        assert_eq!(json["url"], "https://example.com/taxi");
    }
}
