//! Column sorting for the incident table.
//!
//! Each sortable column maps a record to an explicit [`SortKey`] before any
//! comparison happens, so received timestamps compare chronologically and
//! response times compare numerically. Records without a key always sort
//! after records with one, whichever direction is active.

use std::cmp::Ordering;

use cad_dashboard_incident_models::{EnrichedIncident, IncidentField};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A sortable table column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    /// Received timestamp.
    Received,
    /// Call type description.
    CallType,
    /// Priority code.
    Priority,
    /// Response time in minutes.
    ResponseTime,
    /// Police district.
    District,
    /// Agency.
    Agency,
}

/// Sort direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A typed comparison key for one record under one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    /// Chronological key.
    Timestamp(NaiveDateTime),
    /// Lexicographic key.
    Text(&'a str),
    /// Numeric key.
    Minutes(i64),
}

impl SortField {
    /// Builds the key for `record`, or `None` if the column is empty.
    #[must_use]
    pub fn key(self, record: &EnrichedIncident) -> Option<SortKey<'_>> {
        match self {
            Self::Received => record.received_at.map(SortKey::Timestamp),
            Self::CallType => text_key(IncidentField::CallType, record),
            Self::Priority => text_key(IncidentField::Priority, record),
            Self::District => text_key(IncidentField::District, record),
            Self::Agency => text_key(IncidentField::Agency, record),
            Self::ResponseTime => record.response_time_minutes.map(SortKey::Minutes),
        }
    }
}

fn text_key(field: IncidentField, record: &EnrichedIncident) -> Option<SortKey<'_>> {
    field.value(&record.incident).map(SortKey::Text)
}

/// The active table sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSort {
    /// Column being sorted.
    pub field: SortField,
    /// Direction.
    pub direction: SortDirection,
}

impl Default for TableSort {
    /// Newest calls first.
    fn default() -> Self {
        Self {
            field: SortField::Received,
            direction: SortDirection::Desc,
        }
    }
}

impl TableSort {
    /// Sort state after the user clicks the header of `field`.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column switches to it in ascending order.
    #[must_use]
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Returns `records` ordered by `sort`. Equal keys keep their input order.
#[must_use]
pub fn sort_incidents<'a>(
    records: &[&'a EnrichedIncident],
    sort: TableSort,
) -> Vec<&'a EnrichedIncident> {
    let mut keyed: Vec<(Option<SortKey<'a>>, &'a EnrichedIncident)> = records
        .iter()
        .map(|&record| (sort.field.key(record), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), sort.direction));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        },
    }
}
