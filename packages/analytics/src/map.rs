//! Map markers for incidents that carry a usable intersection point.

use cad_dashboard_analytics_models::{MapMarker, MarkerBounds, MarkerColor};
use cad_dashboard_filter::Selection;
use cad_dashboard_incident_models::{EnrichedIncident, PointGeometry};
use geo::{BoundingRect, MultiPoint, Point};

/// Marker radius for selected records.
pub const SELECTED_RADIUS: u8 = 8;

/// Marker radius for everything else.
pub const DEFAULT_RADIUS: u8 = 5;

/// Extracts `(latitude, longitude)` from a `[longitude, latitude]` point.
///
/// Returns `None` unless there are exactly two finite components inside the
/// valid latitude and longitude ranges.
#[must_use]
pub fn parse_coordinates(point: Option<&PointGeometry>) -> Option<(f64, f64)> {
    let &[longitude, latitude] = point?.coordinates.as_slice() else {
        return None;
    };
    ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
        .then_some((latitude, longitude))
}

fn marker_color(selected: bool, priority: Option<&str>) -> MarkerColor {
    if selected {
        return MarkerColor::Selected;
    }
    match priority {
        Some("A") => MarkerColor::High,
        Some("B") => MarkerColor::Medium,
        Some("C") => MarkerColor::Low,
        _ => MarkerColor::Default,
    }
}

/// Builds one marker per record with usable coordinates, in input order.
#[must_use]
pub fn map_markers(records: &[&EnrichedIncident], selection: &Selection) -> Vec<MapMarker> {
    let markers: Vec<MapMarker> = records
        .iter()
        .filter_map(|record| {
            let incident = &record.incident;
            let (latitude, longitude) = parse_coordinates(incident.intersection_point.as_ref())?;
            let selected = selection.contains(&incident.id);
            Some(MapMarker {
                id: incident.id.clone(),
                latitude,
                longitude,
                priority: incident.priority_final.clone(),
                call_type: incident.call_type_final_desc.clone(),
                color: marker_color(selected, incident.priority_final.as_deref()),
                radius: if selected {
                    SELECTED_RADIUS
                } else {
                    DEFAULT_RADIUS
                },
                selected,
            })
        })
        .collect();

    log::debug!(
        "Built {} map markers from {} incidents",
        markers.len(),
        records.len()
    );

    markers
}

/// Bounding box around `markers`, or `None` when there are none.
#[must_use]
pub fn marker_bounds(markers: &[MapMarker]) -> Option<MarkerBounds> {
    let points: MultiPoint<f64> = markers
        .iter()
        .map(|marker| Point::new(marker.longitude, marker.latitude))
        .collect();

    points.bounding_rect().map(|rect| MarkerBounds {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    })
}
