#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result shapes produced by the aggregation engine and the map marker
//! builder.
//!
//! Everything here is plain data. The types serialize with camelCase keys so
//! a rendering layer can consume them directly as JSON.

use cad_dashboard_incident_models::DayOfWeek;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A named bucket with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Bucket label (call type description or priority code).
    pub name: String,
    /// Number of records in the bucket.
    pub count: u64,
}

/// Record count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCount {
    /// Hour, 0 through 23.
    pub hour: u32,
    /// Number of records received during this hour.
    pub count: u64,
}

impl HourCount {
    /// Axis label, e.g. `"7:00"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:00", self.hour)
    }
}

/// Record count for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    /// Day of the week.
    pub day: DayOfWeek,
    /// Number of records received on this day.
    pub count: u64,
}

/// Response time statistics for one police district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictResponseTime {
    /// Police district name.
    pub district: String,
    /// Mean response time in minutes.
    pub average: f64,
    /// Median response time in minutes.
    pub median: f64,
}

/// A single point in the daily trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Number of records received on this date.
    pub count: u64,
}

/// Headline numbers for the filtered records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of records.
    pub total: u64,
    /// Number of records with the highest priority code.
    pub high_priority: u64,
    /// Mean of the usable response times, 0 when there are none.
    pub average_response_minutes: f64,
    /// Median of the usable response times, 0 when there are none.
    pub median_response_minutes: f64,
}

/// Every chart aggregation for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    /// Most frequent call types.
    pub top_call_types: Vec<CategoryCount>,
    /// Counts per priority code.
    pub priorities: Vec<CategoryCount>,
    /// 24 hourly buckets.
    pub hourly: Vec<HourCount>,
    /// 7 weekday buckets starting Sunday.
    pub weekly: Vec<DayCount>,
    /// Slowest districts by average response time.
    pub district_response_times: Vec<DistrictResponseTime>,
    /// Daily counts for the most recent dates.
    pub daily_trend: Vec<TimeSeriesPoint>,
    /// Headline numbers.
    pub summary: SummaryStats,
}

/// Fill colour of a map marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerColor {
    /// The record is selected.
    Selected,
    /// Priority A.
    High,
    /// Priority B.
    Medium,
    /// Priority C.
    Low,
    /// Any other or missing priority.
    Default,
}

impl MarkerColor {
    /// The colour as a CSS hex string.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Selected => "#3B82F6",
            Self::High => "#EF4444",
            Self::Medium => "#F59E0B",
            Self::Low => "#10B981",
            Self::Default => "#6B7280",
        }
    }
}

/// One plotted incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Record id.
    pub id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Priority code, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Call type description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
    /// Fill colour.
    pub color: MarkerColor,
    /// Radius in pixels.
    pub radius: u8,
    /// Whether the record is in the current selection.
    pub selected: bool,
}

/// Geographic bounding box around a set of markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerBounds {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl MarkerBounds {
    /// Centre of the box as `(latitude, longitude)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }
}
