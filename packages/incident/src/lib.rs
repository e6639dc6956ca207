#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-incident processing for the CAD dashboard.
//!
//! [`enrich()`] turns a [`RawIncident`](cad_dashboard_incident_models::RawIncident)
//! into an [`EnrichedIncident`](cad_dashboard_incident_models::EnrichedIncident)
//! by deriving response time, call duration, and the received hour, weekday,
//! and date. Enrichment never fails: a timestamp that cannot be parsed only
//! leaves the fields that depend on it empty.

pub mod enrich;
pub mod format;
pub mod options;
pub mod parsing;

pub use enrich::{enrich, enrich_all};
