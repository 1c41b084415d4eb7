//! Built-in demo catalog.
//!
//! Six lines, ten stations around the bay, three incident datasets of three
//! incidents each (one per [`Scenario`]), and six recommendations, two per
//! [`Intent`]. Incident start times are expressed relative to a caller
//! supplied base time so elapsed-time labels stay meaningful whenever the
//! demo is started.

use chrono::{DateTime, TimeDelta, Utc};
use incident_types::{
    Incident, IncidentId, IncidentStatus, Intent, Line, LineId, Recommendation,
    RecommendationAction, RecommendationId, Scenario, Station, StationId,
};

use crate::catalog::Catalog;
use crate::error::CatalogError;

/// Helper to build a [`Line`].
fn line(id: LineId, name: &str) -> Line {
    Line {
        id,
        name: name.to_owned(),
    }
}

/// Helper to build a [`Station`].
fn station(id: StationId, name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        id,
        name: name.to_owned(),
        latitude,
        longitude,
    }
}

/// Helper to build an [`Incident`] that started `minutes_ago` before `base`.
#[allow(clippy::too_many_arguments)]
fn incident(
    base: DateTime<Utc>,
    minutes_ago: i64,
    status: IncidentStatus,
    line_id: LineId,
    affected: &str,
    related: &[StationId],
    summary: &str,
    source_url: Option<&str>,
) -> Incident {
    Incident {
        id: IncidentId::new(),
        status,
        line_id: Some(line_id),
        affected_text: affected.to_owned(),
        related_station_ids: related.to_vec(),
        summary: summary.to_owned(),
        started_at: minutes_before(base, minutes_ago),
        source_url: source_url.map(str::to_owned),
    }
}

/// Helper to build a [`Recommendation`].
fn recommendation(
    intent: Intent,
    title: &str,
    detail: &str,
    actions: Vec<RecommendationAction>,
) -> Recommendation {
    Recommendation {
        id: RecommendationId::new(),
        intent,
        title: title.to_owned(),
        detail: detail.to_owned(),
        actions,
    }
}

/// Helper for external-link actions.
fn external(url: &str) -> RecommendationAction {
    RecommendationAction::OpenExternal(url.to_owned())
}

/// `base` shifted back by `minutes`, saturating at `base` on overflow.
fn minutes_before(base: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| base.checked_sub_signed(delta))
        .unwrap_or(base)
}

/// Identifiers for the demo lines and stations, so callers can refer to
/// specific entries without searching by name.
#[derive(Debug, Clone)]
pub struct DemoIds {
    /// Hokubu Rapid Line.
    pub hokubu_rapid: LineId,
    /// Nankai Main Line.
    pub nankai_main: LineId,
    /// Chuo Metro.
    pub chuo_metro: LineId,
    /// Bayside Liner.
    pub bayside_liner: LineId,
    /// Airport Access.
    pub airport_access: LineId,
    /// Tanima Local.
    pub tanima_local: LineId,

    /// Kitahama.
    pub kitahama: StationId,
    /// Minamihama.
    pub minamihama: StationId,
    /// Chuo.
    pub chuo: StationId,
    /// Sakuragawa.
    pub sakuragawa: StationId,
    /// Yanagibashi.
    pub yanagibashi: StationId,
    /// Minatomae.
    pub minatomae: StationId,
    /// Airport Gate.
    pub airport_gate: StationId,
    /// Higashibata.
    pub higashibata: StationId,
    /// Nishigaoka.
    pub nishigaoka: StationId,
    /// Tanima.
    pub tanima: StationId,
}

impl DemoIds {
    fn generate() -> Self {
        Self {
            hokubu_rapid: LineId::new(),
            nankai_main: LineId::new(),
            chuo_metro: LineId::new(),
            bayside_liner: LineId::new(),
            airport_access: LineId::new(),
            tanima_local: LineId::new(),
            kitahama: StationId::new(),
            minamihama: StationId::new(),
            chuo: StationId::new(),
            sakuragawa: StationId::new(),
            yanagibashi: StationId::new(),
            minatomae: StationId::new(),
            airport_gate: StationId::new(),
            higashibata: StationId::new(),
            nishigaoka: StationId::new(),
            tanima: StationId::new(),
        }
    }
}

/// Build the demo catalog with incidents timed relative to `base`.
///
/// Returns the [`Catalog`] and the [`DemoIds`] of its lines and stations.
///
/// # Errors
///
/// Returns [`CatalogError`] if catalog construction fails (should not
/// happen with freshly generated IDs).
#[allow(clippy::too_many_lines)]
pub fn demo_catalog(base: DateTime<Utc>) -> Result<(Catalog, DemoIds), CatalogError> {
    let ids = DemoIds::generate();
    let mut builder = Catalog::builder();

    // ---------------------------------------------------------------
    // Lines
    // ---------------------------------------------------------------
    builder
        .add_line(line(ids.hokubu_rapid, "Hokubu Rapid Line"))?
        .add_line(line(ids.nankai_main, "Nankai Main Line"))?
        .add_line(line(ids.chuo_metro, "Chuo Metro"))?
        .add_line(line(ids.bayside_liner, "Bayside Liner"))?
        .add_line(line(ids.airport_access, "Airport Access"))?
        .add_line(line(ids.tanima_local, "Tanima Local"))?;

    // ---------------------------------------------------------------
    // Stations
    // ---------------------------------------------------------------
    builder
        .add_station(station(ids.kitahama, "Kitahama", 35.68, 139.77))?
        .add_station(station(ids.minamihama, "Minamihama", 35.64, 139.74))?
        .add_station(station(ids.chuo, "Chuo", 35.69, 139.70))?
        .add_station(station(ids.sakuragawa, "Sakuragawa", 35.67, 139.73))?
        .add_station(station(ids.yanagibashi, "Yanagibashi", 35.65, 139.76))?
        .add_station(station(ids.minatomae, "Minatomae", 35.63, 139.78))?
        .add_station(station(ids.airport_gate, "Airport Gate", 35.62, 139.82))?
        .add_station(station(ids.higashibata, "Higashibata", 35.69, 139.83))?
        .add_station(station(ids.nishigaoka, "Nishigaoka", 35.70, 139.68))?
        .add_station(station(ids.tanima, "Tanima", 35.71, 139.65))?;

    // ---------------------------------------------------------------
    // Scenario: normal
    // ---------------------------------------------------------------
    builder
        .add_incident(
            Scenario::Normal,
            incident(
                base,
                5,
                IncidentStatus::Stopped,
                ids.hokubu_rapid,
                "Suspended between Kitahama and Sakuragawa",
                &[ids.kitahama, ids.sakuragawa],
                "Hokubu Rapid Line is stopped on part of the line for a rolling stock inspection.",
                Some("https://example.com/stop"),
            ),
        )?
        .add_incident(
            Scenario::Normal,
            incident(
                base,
                40,
                IncidentStatus::Delayed,
                ids.chuo_metro,
                "10-15 min late between Chuo and Minatomae",
                &[ids.chuo, ids.minatomae],
                "Delays following a safety check inside a station.",
                Some("https://example.com/delay"),
            ),
        )?
        .add_incident(
            Scenario::Normal,
            incident(
                base,
                120,
                IncidentStatus::Caution,
                ids.airport_access,
                "Running at reduced speed due to strong wind",
                &[ids.airport_gate, ids.higashibata],
                "Airport Access trains are slowing down because of strong wind.",
                None,
            ),
        )?;

    // ---------------------------------------------------------------
    // Scenario: delay heavy
    // ---------------------------------------------------------------
    builder
        .add_incident(
            Scenario::DelayHeavy,
            incident(
                base,
                70,
                IncidentStatus::Delayed,
                ids.nankai_main,
                "15-25 min late between Minamihama and Minatomae",
                &[ids.minamihama, ids.minatomae],
                "Delays are growing after a signal inspection.",
                Some("https://example.com/delay-heavy"),
            ),
        )?
        .add_incident(
            Scenario::DelayHeavy,
            incident(
                base,
                25,
                IncidentStatus::Delayed,
                ids.bayside_liner,
                "About 10 min late on the whole Bayside Liner",
                &[ids.minatomae, ids.higashibata],
                "Crowding on the preceding train is causing delays.",
                None,
            ),
        )?
        .add_incident(
            Scenario::DelayHeavy,
            incident(
                base,
                110,
                IncidentStatus::Caution,
                ids.tanima_local,
                "Reduced service on the Tanima Local",
                &[ids.tanima],
                "Some trains are cancelled due to a rolling stock shortage.",
                Some("https://example.com/caution"),
            ),
        )?;

    // ---------------------------------------------------------------
    // Scenario: stopped heavy
    // ---------------------------------------------------------------
    builder
        .add_incident(
            Scenario::StoppedHeavy,
            incident(
                base,
                15,
                IncidentStatus::Stopped,
                ids.hokubu_rapid,
                "Suspended between Kitahama and Chuo",
                &[ids.kitahama, ids.chuo],
                "Both directions are stopped after a person was hit by a train.",
                Some("https://example.com/stop-heavy"),
            ),
        )?
        .add_incident(
            Scenario::StoppedHeavy,
            incident(
                base,
                180,
                IncidentStatus::Stopped,
                ids.airport_access,
                "Airport Access suspended on the whole line",
                &[ids.airport_gate, ids.higashibata],
                "Service may be suspended all day because of a strong wind warning.",
                None,
            ),
        )?
        .add_incident(
            Scenario::StoppedHeavy,
            incident(
                base,
                55,
                IncidentStatus::Delayed,
                ids.chuo_metro,
                "15 min late on the Chuo Metro",
                &[ids.chuo],
                "Turnback adjustments are in place because of crowding.",
                Some("https://example.com/metro"),
            ),
        )?;

    // ---------------------------------------------------------------
    // Recommendations
    // ---------------------------------------------------------------
    builder
        .add_recommendation(recommendation(
            Intent::Hurry,
            "Switch to a taxi",
            "Taxi rank in front of Kitahama station. Saves 10-15 min.",
            vec![
                external("https://example.com/taxi"),
                RecommendationAction::ShowMap,
                RecommendationAction::ShowFact,
            ],
        ))?
        .add_recommendation(recommendation(
            Intent::Hurry,
            "Transfer to the Chuo Metro",
            "The Chuo Metro is delayed but still running.",
            vec![RecommendationAction::ShowMap, RecommendationAction::ShowFact],
        ))?
        .add_recommendation(recommendation(
            Intent::Detour,
            "Go via the Bayside Liner",
            "Takes 20 min longer but keeps running. Good chance of a seat.",
            vec![
                RecommendationAction::ShowMap,
                external("https://example.com/route"),
            ],
        ))?
        .add_recommendation(recommendation(
            Intent::Detour,
            "Check replacement buses",
            "Buses from Minamihama to Minatomae every 10 min.",
            vec![
                external("https://example.com/bus"),
                RecommendationAction::ShowFact,
            ],
        ))?
        .add_recommendation(recommendation(
            Intent::KillTime,
            "Wait at the station cafe",
            "Cafe inside the Sakuragawa ticket gates. Wi-Fi available.",
            vec![external("https://example.com/cafe")],
        ))?
        .add_recommendation(recommendation(
            Intent::KillTime,
            "Wait for Airport Access to resume",
            "No estimate yet. Check back every 30 min.",
            vec![RecommendationAction::ShowFact],
        ))?;

    Ok((builder.build(), ids))
}
