#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregations and map markers for the dashboard.
//!
//! Every function here takes the already-filtered records and derives a
//! fresh result from them. Nothing is cached between calls and no function
//! can fail; empty input simply produces empty or zeroed output.

pub mod charts;
pub mod map;
pub mod stats;

pub use charts::{
    charts, daily_trend, day_of_week_histogram, district_response_times, hourly_histogram,
    priority_distribution, summary, top_call_types,
};
pub use map::{map_markers, marker_bounds, parse_coordinates};
