//! Derivation of per-incident temporal metrics.

use cad_dashboard_incident_models::{DayOfWeek, EnrichedIncident, RawIncident};
use chrono::{Datelike as _, NaiveDateTime, Timelike as _};

use crate::parsing::parse_timestamp;

/// Enriches a single incident with its derived metrics.
///
/// * response time: on-scene minus received, in whole minutes truncated
///   toward zero
/// * call duration: close minus received, same rule
/// * hour of day, day of week, and date: from the received timestamp
///
/// Negative durations are passed through unchanged. Missing or unparseable
/// timestamps leave the dependent fields as `None`.
#[must_use]
pub fn enrich(incident: RawIncident) -> EnrichedIncident {
    let received = parse_field(
        &incident.id,
        "received_datetime",
        incident.received_datetime.as_deref(),
    );
    let on_scene = parse_field(
        &incident.id,
        "onscene_datetime",
        incident.onscene_datetime.as_deref(),
    );
    let closed = parse_field(
        &incident.id,
        "close_datetime",
        incident.close_datetime.as_deref(),
    );

    EnrichedIncident {
        received_at: received,
        response_time_minutes: received
            .zip(on_scene)
            .map(|(start, end)| minutes_between(start, end)),
        call_duration_minutes: received
            .zip(closed)
            .map(|(start, end)| minutes_between(start, end)),
        hour_of_day: received.map(|dt| dt.hour()),
        day_of_week: received.map(|dt| DayOfWeek::from(dt.weekday())),
        date: received.map(|dt| dt.date()),
        incident,
    }
}

/// Enriches a batch of incidents, preserving order.
#[must_use]
pub fn enrich_all(incidents: Vec<RawIncident>) -> Vec<EnrichedIncident> {
    let enriched: Vec<EnrichedIncident> = incidents.into_iter().map(enrich).collect();
    log::debug!("Enriched {} incidents", enriched.len());
    enriched
}

fn parse_field(id: &str, field: &str, value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        log::debug!("Incident {id}: could not parse {field} {value:?}");
    }
    parsed
}

fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}
