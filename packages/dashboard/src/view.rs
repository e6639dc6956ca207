//! The computed dashboard for one filter, sort, and selection state.

use cad_dashboard_analytics::{charts, map_markers, marker_bounds};
use cad_dashboard_analytics_models::{Charts, MapMarker, MarkerBounds};
use cad_dashboard_filter::{FilterSpec, TableSort, filter_all, sort_incidents};
use cad_dashboard_incident::format::{format_duration, format_timestamp};
use cad_dashboard_incident::options::FilterOptions;
use cad_dashboard_incident_models::EnrichedIncident;
use serde::Serialize;

/// One row of the incident table, with display strings precomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// The record.
    #[serde(flatten)]
    pub incident: EnrichedIncident,
    /// Whether the record is in the current selection.
    pub selected: bool,
    /// Formatted received timestamp.
    pub received: String,
    /// Formatted response time.
    pub response_time: String,
    /// Formatted call duration.
    pub call_duration: String,
}

impl TableRow {
    fn new(record: &EnrichedIncident, selected: bool) -> Self {
        Self {
            received: format_timestamp(record.incident.received_datetime.as_deref()),
            response_time: format_duration(record.response_time_minutes),
            call_duration: format_duration(record.call_duration_minutes),
            incident: record.clone(),
            selected,
        }
    }
}

/// Everything the rendering layer needs for one state of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Filtered records in table order.
    pub rows: Vec<TableRow>,
    /// Chart aggregations over the filtered records.
    pub charts: Charts,
    /// Map markers for filtered records with usable coordinates.
    pub markers: Vec<MapMarker>,
    /// Box that fits every marker, if there are any.
    pub bounds: Option<MarkerBounds>,
    /// Filter choices discovered from the whole loaded batch.
    pub options: FilterOptions,
    /// Number of loaded records.
    pub total_count: usize,
    /// Number of records passing the filter.
    pub filtered_count: usize,
    /// Number of selected records.
    pub selected_count: usize,
    /// Whether any filter criterion is active.
    pub filters_active: bool,
    /// Sort applied to `rows`.
    pub sort: TableSort,
}

impl DashboardView {
    /// Recomputes the dashboard from the loaded records.
    #[must_use]
    pub fn compute(incidents: &[EnrichedIncident], spec: &FilterSpec, sort: TableSort) -> Self {
        let filtered = filter_all(incidents, spec);
        let sorted = sort_incidents(&filtered, sort);
        let markers = map_markers(&filtered, &spec.selection);

        log::debug!(
            "Dashboard view: {} of {} incidents, {} markers",
            filtered.len(),
            incidents.len(),
            markers.len()
        );

        Self {
            rows: sorted
                .iter()
                .map(|record| TableRow::new(record, spec.selection.contains(&record.incident.id)))
                .collect(),
            charts: charts(&filtered),
            bounds: marker_bounds(&markers),
            markers,
            options: FilterOptions::from_incidents(incidents),
            total_count: incidents.len(),
            filtered_count: filtered.len(),
            selected_count: spec.selection.len(),
            filters_active: spec.is_active(),
            sort,
        }
    }

    /// Ids of the rows currently shown, in table order.
    pub fn row_ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(|row| row.incident.incident.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use cad_dashboard_analytics_models::MarkerColor;
    use cad_dashboard_filter::{SortDirection, SortField};
    use cad_dashboard_incident::enrich;
    use cad_dashboard_incident_models::{IncidentField, PointGeometry, RawIncident};

    use super::*;

    fn record(id: &str, priority: &str, received: &str) -> EnrichedIncident {
        enrich(RawIncident {
            id: id.to_string(),
            received_datetime: Some(received.to_string()),
            priority_final: Some(priority.to_string()),
            call_type_final_desc: Some("PASSING CALL".to_string()),
            ..RawIncident::default()
        })
    }

    fn located(id: &str, priority: &str, lng: f64, lat: f64) -> EnrichedIncident {
        let mut incident = record(id, priority, "2025-05-03T12:00:00.000");
        incident.incident.intersection_point = Some(PointGeometry::new(lng, lat));
        incident
    }

    fn same_day_batch() -> Vec<EnrichedIncident> {
        vec![
            record("1", "A", "2025-05-03T08:00:00.000"),
            record("2", "B", "2025-05-03T09:00:00.000"),
            record("3", "A", "2025-05-03T10:00:00.000"),
        ]
    }

    #[test]
    fn unfiltered_view_covers_everything() {
        let incidents = same_day_batch();
        let view = DashboardView::compute(&incidents, &FilterSpec::default(), TableSort::default());

        assert_eq!(view.total_count, 3);
        assert_eq!(view.filtered_count, 3);
        assert!(!view.filters_active);
        assert_eq!(view.row_ids().collect::<Vec<_>>(), vec!["3", "2", "1"]);
        assert_eq!(view.charts.summary.high_priority, 2);
        assert_eq!(view.charts.priorities.len(), 2);
        assert!(view.markers.is_empty());
        assert_eq!(view.bounds, None);
    }

    #[test]
    fn filter_narrows_rows_but_not_options() {
        let incidents = same_day_batch();
        let spec = FilterSpec::default().toggled_value(IncidentField::Priority, "A");
        let view = DashboardView::compute(&incidents, &spec, TableSort::default());

        assert!(view.filters_active);
        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.charts.summary.total, 2);
        assert_eq!(view.options.priorities, vec!["A", "B"]);
    }

    #[test]
    fn selection_marks_rows_and_markers_without_filtering() {
        let incidents = vec![
            located("1", "A", -122.41, 37.77),
            located("2", "C", -122.39, 37.79),
        ];
        let spec = FilterSpec::default();
        let selected = spec.with_selection(spec.selection.toggled("2"));
        let view = DashboardView::compute(&incidents, &selected, TableSort::default());

        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.selected_count, 1);
        let row = view
            .rows
            .iter()
            .find(|r| r.incident.incident.id == "2")
            .unwrap();
        assert!(row.selected);
        assert_eq!(view.markers[0].color, MarkerColor::High);
        assert_eq!(view.markers[1].color, MarkerColor::Selected);
        let bounds = view.bounds.unwrap();
        assert!((bounds.north - 37.79).abs() < f64::EPSILON);
    }

    #[test]
    fn rows_follow_requested_sort() {
        let incidents = same_day_batch();
        let sort = TableSort {
            field: SortField::Priority,
            direction: SortDirection::Asc,
        };
        let view = DashboardView::compute(&incidents, &FilterSpec::default(), sort);
        assert_eq!(view.row_ids().collect::<Vec<_>>(), vec!["1", "3", "2"]);
    }

    #[test]
    fn rows_carry_display_strings() {
        let mut incident = record("9", "B", "2025-05-03T14:30:00.000");
        incident.response_time_minutes = Some(75);
        let view =
            DashboardView::compute(&[incident], &FilterSpec::default(), TableSort::default());

        assert_eq!(view.rows[0].received, "May 03, 2025 14:30");
        assert_eq!(view.rows[0].response_time, "1h 15m");
        assert_eq!(view.rows[0].call_duration, "N/A");
    }

    #[test]
    fn serializes_for_rendering() {
        let incidents = same_day_batch();
        let view = DashboardView::compute(&incidents, &FilterSpec::default(), TableSort::default());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["filteredCount"], serde_json::json!(3));
        assert_eq!(value["rows"][0]["id"], serde_json::json!("3"));
        assert_eq!(value["rows"][0]["priority_final"], serde_json::json!("A"));
        let summary = &value["charts"]["summary"];
        assert_eq!(summary["highPriority"], serde_json::json!(2));
    }
}
