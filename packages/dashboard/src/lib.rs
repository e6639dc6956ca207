#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CAD dispatch dashboard pipeline.
//!
//! Loading fetches raw records from a configured source and enriches them
//! once. Every later interaction (a filter toggle, a search keystroke, a
//! selection change, a column click) recomputes a [`DashboardView`] from the
//! loaded records without touching the network.

pub mod view;

use cad_dashboard_incident::enrich_all;
use cad_dashboard_incident_models::EnrichedIncident;
use cad_dashboard_source::registry::{DEFAULT_SOURCE_ID, source_by_id};
use cad_dashboard_source::{SourceConfig, SourceError, fetch_incidents, fetch_incidents_between};
use chrono::NaiveDateTime;

pub use view::{DashboardView, TableRow};

/// Errors that can occur while loading the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Fetching from the source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// No registered source has the requested id.
    #[error("Unknown source: {id}")]
    UnknownSource {
        /// The requested source id.
        id: String,
    },
}

/// Fetches the latest records from `source` and enriches them.
///
/// # Errors
///
/// Returns [`DashboardError::Source`] if the fetch fails.
pub async fn load_incidents(
    source: &SourceConfig,
    limit: Option<u64>,
) -> Result<Vec<EnrichedIncident>, DashboardError> {
    let raw = fetch_incidents(source, limit).await?;
    Ok(enrich_all(raw))
}

/// Fetches records received between `start` and `end` and enriches them.
///
/// # Errors
///
/// Returns [`DashboardError::Source`] if the fetch fails.
pub async fn load_incidents_between(
    source: &SourceConfig,
    start: NaiveDateTime,
    end: NaiveDateTime,
    limit: Option<u64>,
) -> Result<Vec<EnrichedIncident>, DashboardError> {
    let raw = fetch_incidents_between(source, start, end, limit).await?;
    Ok(enrich_all(raw))
}

/// Resolves a registered source by id.
///
/// # Errors
///
/// Returns [`DashboardError::UnknownSource`] if no source has that id.
pub fn resolve_source(id: &str) -> Result<SourceConfig, DashboardError> {
    source_by_id(id).ok_or_else(|| DashboardError::UnknownSource { id: id.into() })
}

/// Loads the latest records from the default source.
///
/// # Errors
///
/// Returns [`DashboardError`] if the source is missing or the fetch fails.
pub async fn load_default(limit: Option<u64>) -> Result<Vec<EnrichedIncident>, DashboardError> {
    let source = resolve_source(DEFAULT_SOURCE_ID)?;
    log::info!("Loading incidents from {}", source.name);
    load_incidents(&source, limit).await
}
