#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident filtering for the CAD dashboard.
//!
//! A [`FilterSpec`] describes the current query: inclusion sets for call
//! type, priority, district, and agency, a free-text search term, and a
//! received-date range. A record passes when it satisfies every active
//! criterion. Empty sets and an empty search term are inert.
//!
//! The filter also carries the user's [`Selection`]; the selection never
//! influences which records pass.

pub mod selection;
pub mod sort;

use std::collections::BTreeSet;

use cad_dashboard_incident_models::{EnrichedIncident, IncidentField, RawIncident};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub use selection::Selection;
pub use sort::{SortDirection, SortField, TableSort, sort_incidents};

/// Last representable millisecond of a day.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// An inclusive received-date window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First included day (from midnight).
    pub start: Option<NaiveDate>,
    /// Last included day (through 23:59:59.999).
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns `true` if at least one bound is set.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns `true` if `received` lies within the range.
    ///
    /// An unbounded range contains everything, including records without
    /// a received timestamp. A bounded range requires one.
    #[must_use]
    pub fn contains(&self, received: Option<NaiveDateTime>) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(received) = received else {
            return false;
        };
        let after_start = self
            .start
            .is_none_or(|start| received >= start.and_time(NaiveTime::MIN));
        let before_end = self
            .end
            .is_none_or(|end| received <= end.and_time(END_OF_DAY));
        after_start && before_end
    }
}

/// The full filter query applied to the incident table, charts, and map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Accepted call type descriptions.
    pub call_types: BTreeSet<String>,
    /// Accepted priority codes.
    pub priorities: BTreeSet<String>,
    /// Accepted police districts.
    pub districts: BTreeSet<String>,
    /// Accepted agencies.
    pub agencies: BTreeSet<String>,
    /// Case-insensitive search over call type, intersection, and
    /// neighborhood.
    pub search_term: String,
    /// Received-date window.
    pub date_range: DateRange,
    /// Currently selected incident ids. Not a filter criterion.
    pub selection: Selection,
}

impl FilterSpec {
    /// Returns the inclusion set for `field`.
    #[must_use]
    pub const fn values(&self, field: IncidentField) -> &BTreeSet<String> {
        match field {
            IncidentField::CallType => &self.call_types,
            IncidentField::Priority => &self.priorities,
            IncidentField::District => &self.districts,
            IncidentField::Agency => &self.agencies,
        }
    }

    /// Returns a copy with `value` toggled in the inclusion set for `field`.
    #[must_use]
    pub fn toggled_value(&self, field: IncidentField, value: &str) -> Self {
        let mut next = self.clone();
        let set = match field {
            IncidentField::CallType => &mut next.call_types,
            IncidentField::Priority => &mut next.priorities,
            IncidentField::District => &mut next.districts,
            IncidentField::Agency => &mut next.agencies,
        };
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        next
    }

    /// Returns a copy carrying `selection`.
    #[must_use]
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    /// Returns a filter with every criterion inert and nothing selected.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Returns `true` if any criterion constrains the result.
    #[must_use]
    pub fn is_active(&self) -> bool {
        IncidentField::ALL
            .iter()
            .any(|field| !self.values(*field).is_empty())
            || !self.search_term.is_empty()
            || self.date_range.is_bounded()
    }

    /// Tests a single record against every criterion.
    ///
    /// Each criterion is evaluated on its own and the results are combined
    /// with a logical AND.
    #[must_use]
    pub fn matches(&self, record: &EnrichedIncident) -> bool {
        let incident = &record.incident;

        let call_type = self.includes(IncidentField::CallType, incident);
        let priority = self.includes(IncidentField::Priority, incident);
        let district = self.includes(IncidentField::District, incident);
        let agency = self.includes(IncidentField::Agency, incident);
        let search = self.search_matches(incident);
        let date = self.date_range.contains(record.received_at);

        call_type && priority && district && agency && search && date
    }

    fn includes(&self, field: IncidentField, incident: &RawIncident) -> bool {
        let accepted = self.values(field);
        accepted.is_empty() || field.value(incident).is_some_and(|v| accepted.contains(v))
    }

    fn search_matches(&self, incident: &RawIncident) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        [
            incident.call_type_final_desc.as_deref(),
            incident.intersection_name.as_deref(),
            incident.analysis_neighborhood.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

/// Returns the records matching `spec`, in their original order.
#[must_use]
pub fn filter_all<'a>(
    records: &'a [EnrichedIncident],
    spec: &FilterSpec,
) -> Vec<&'a EnrichedIncident> {
    let matched: Vec<&EnrichedIncident> = records.iter().filter(|r| spec.matches(r)).collect();
    log::debug!(
        "Filter matched {} of {} incidents",
        matched.len(),
        records.len()
    );
    matched
}
