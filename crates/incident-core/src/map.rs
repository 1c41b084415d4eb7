//! Map annotations and viewport for the current incident.
//!
//! Rendering is the presentation layer's job. This module only decides
//! which stations to pin and where the viewport should sit.

use incident_catalog::Catalog;
use incident_types::{Incident, Station};
use serde::Serialize;

/// Viewport center used when there is nothing to pin.
pub const DEFAULT_CENTER: (f64, f64) = (35.68, 139.76);

/// Span (degrees) around the first pinned station.
pub const FOCUSED_SPAN_DEGREES: f64 = 0.1;

/// Span (degrees) of the default overview.
pub const OVERVIEW_SPAN_DEGREES: f64 = 0.2;

/// A rectangular map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    /// Center latitude.
    pub center_latitude: f64,
    /// Center longitude.
    pub center_longitude: f64,
    /// Latitude span in degrees.
    pub latitude_span: f64,
    /// Longitude span in degrees.
    pub longitude_span: f64,
}

/// Catalog stations referenced by the incident, in catalog order.
///
/// Related IDs that are not in the catalog are ignored.
pub fn related_stations<'a>(catalog: &'a Catalog, incident: &Incident) -> Vec<&'a Station> {
    catalog
        .stations_all()
        .iter()
        .filter(|station| incident.related_station_ids.contains(&station.id))
        .collect()
}

/// Viewport for a set of pinned stations.
///
/// Centers on the first station with a tight span, or shows the default
/// overview when there are no stations.
pub fn map_region(stations: &[&Station]) -> MapRegion {
    let overview = MapRegion {
        center_latitude: DEFAULT_CENTER.0,
        center_longitude: DEFAULT_CENTER.1,
        latitude_span: OVERVIEW_SPAN_DEGREES,
        longitude_span: OVERVIEW_SPAN_DEGREES,
    };
    stations.first().map_or(overview, |first| MapRegion {
        center_latitude: first.latitude,
        center_longitude: first.longitude,
        latitude_span: FOCUSED_SPAN_DEGREES,
        longitude_span: FOCUSED_SPAN_DEGREES,
    })
}
