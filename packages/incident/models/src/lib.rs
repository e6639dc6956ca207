#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CAD incident record types shared across the dashboard pipeline.
//!
//! [`RawIncident`] mirrors a dispatched-call record exactly as the Socrata
//! API returns it. [`EnrichedIncident`] wraps a raw record together with the
//! temporal metrics derived from its timestamps. Every optional source field
//! stays an [`Option`] all the way through the pipeline; nothing is coerced
//! to a default value.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Priority code counted as high priority in summary statistics.
pub const HIGH_PRIORITY: &str = "A";

/// Category label used when a grouped field is missing.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A `GeoJSON`-style point attached to an incident's intersection.
///
/// Coordinates are in `[longitude, latitude]` order. The vector is kept as
/// received so that malformed geometries (wrong arity) can be detected
/// downstream instead of failing deserialization of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Geometry type, normally `"Point"`.
    #[serde(rename = "type", default)]
    pub geometry_type: Option<String>,
    /// Raw coordinate components. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
}

impl PointGeometry {
    /// Creates a point from a longitude/latitude pair.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            geometry_type: Some("Point".to_string()),
            coordinates: vec![longitude, latitude],
        }
    }
}

/// A law enforcement dispatched call for service, as received.
///
/// Field names match the Socrata dataset columns. Only `id` is required to
/// be meaningful; a record without one deserializes with an empty id rather
/// than rejecting the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawIncident {
    /// Unique row identifier. `null` reads as empty.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Computer-aided dispatch case number.
    pub cad_number: Option<String>,
    /// When the call was received.
    pub received_datetime: Option<String>,
    /// When the call was entered into CAD.
    pub entry_datetime: Option<String>,
    /// When a unit was dispatched.
    pub dispatch_datetime: Option<String>,
    /// When the first unit went en route.
    pub enroute_datetime: Option<String>,
    /// When the first unit arrived on scene.
    pub onscene_datetime: Option<String>,
    /// When the call was closed.
    pub close_datetime: Option<String>,
    /// Call type code as originally entered.
    pub call_type_original: Option<String>,
    /// Description of the original call type.
    pub call_type_original_desc: Option<String>,
    /// Final call type code.
    pub call_type_final: Option<String>,
    /// Description of the final call type.
    pub call_type_final_desc: Option<String>,
    /// Priority as originally assigned.
    pub priority_original: Option<String>,
    /// Final priority (`"A"`, `"B"`, `"C"`, ...).
    pub priority_final: Option<String>,
    /// Responding agency.
    pub agency: Option<String>,
    /// Disposition code.
    pub disposition: Option<String>,
    /// Whether the call was initiated on view by an officer.
    pub onview_flag: Option<String>,
    /// Whether the call is flagged as sensitive.
    #[serde(deserialize_with = "deserialize_flag")]
    pub sensitive_call: Option<bool>,
    /// Nearest intersection name (e.g. "MARKET ST \ 5TH ST").
    pub intersection_name: Option<String>,
    /// Nearest intersection identifier.
    pub intersection_id: Option<String>,
    /// Intersection location.
    pub intersection_point: Option<PointGeometry>,
    /// Supervisor district.
    pub supervisor_district: Option<String>,
    /// Analysis neighborhood.
    pub analysis_neighborhood: Option<String>,
    /// Police district.
    pub police_district: Option<String>,
    /// When the call record was last updated.
    pub call_last_updated_at: Option<String>,
    /// Data freshness timestamp.
    pub data_as_of: Option<String>,
    /// When the row was loaded into the portal.
    pub data_loaded_at: Option<String>,
}

/// Reads an explicit JSON `null` the same as an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The portal serves checkbox columns either as JSON booleans or as
/// `"true"`/`"false"` text depending on the export path.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => Some(value),
        Some(Flag::Text(text)) => match text.to_ascii_lowercase().as_str() {
            "true" | "t" | "y" | "yes" | "1" => Some(true),
            "false" | "f" | "n" | "no" | "0" => Some(false),
            _ => None,
        },
        None => None,
    })
}

/// A filterable classification field of an incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncidentField {
    /// Final call type description.
    CallType,
    /// Final priority code.
    Priority,
    /// Police district.
    District,
    /// Responding agency.
    Agency,
}

impl IncidentField {
    /// All filterable fields.
    pub const ALL: [Self; 4] = [Self::CallType, Self::Priority, Self::District, Self::Agency];

    /// Returns this field's value on `incident`, if present.
    #[must_use]
    pub fn value(self, incident: &RawIncident) -> Option<&str> {
        match self {
            Self::CallType => incident.call_type_final_desc.as_deref(),
            Self::Priority => incident.priority_final.as_deref(),
            Self::District => incident.police_district.as_deref(),
            Self::Agency => incident.agency.as_deref(),
        }
    }
}

/// Day of the week, in canonical Sunday-first order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DayOfWeek {
    /// Sunday
    Sunday,
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl DayOfWeek {
    /// All seven days, Sunday first.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Zero-based position in the week, counting from Sunday.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Three-letter label for chart axes (e.g. `"Sun"`).
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::Sunday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
        }
    }
}

/// A raw incident plus the metrics derived from its timestamps.
///
/// Each derived field is `Some` only when every timestamp it depends on is
/// present and parses. Durations may be negative when the source data has
/// out-of-order timestamps; consumers decide how to treat those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedIncident {
    /// The record as received.
    #[serde(flatten)]
    pub incident: RawIncident,
    /// Parsed received timestamp, used as the chronological sort key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<NaiveDateTime>,
    /// Whole minutes from received to on scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_minutes: Option<i64>,
    /// Whole minutes from received to close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_duration_minutes: Option<i64>,
    /// Hour of day the call was received (0-23).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_of_day: Option<u32>,
    /// Day of week the call was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    /// Calendar date the call was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl EnrichedIncident {
    /// Response time when it is usable for statistics (defined and
    /// non-negative).
    #[must_use]
    pub fn valid_response_time(&self) -> Option<i64> {
        self.response_time_minutes.filter(|minutes| *minutes >= 0)
    }
}
