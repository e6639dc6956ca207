//! Socrata SODA API fetcher.
//!
//! Issues a single `GET` against the dataset endpoint using the `$limit`,
//! `$order`, and `$where` query parameters and decodes the JSON array into
//! [`RawIncident`]s. There is no pagination and no retry; a failed request
//! surfaces to the caller immediately.

use cad_dashboard_incident_models::RawIncident;
use chrono::NaiveDateTime;

use crate::{SourceConfig, SourceError};

/// Format of the bounds in a `$where ... between` clause.
pub const WHERE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// URL for the most recent `limit` records, newest first.
#[must_use]
pub fn latest_url(config: &SourceConfig, limit: u64) -> String {
    format!(
        "{}?$limit={}&$order={} DESC",
        config.api_url, limit, config.date_column
    )
}

/// URL for up to `limit` records received between `start` and `end`
/// inclusive, newest first.
#[must_use]
pub fn between_url(
    config: &SourceConfig,
    start: NaiveDateTime,
    end: NaiveDateTime,
    limit: u64,
) -> String {
    format!(
        "{}&$where={} between '{}' and '{}'",
        latest_url(config, limit),
        config.date_column,
        start.format(WHERE_TIMESTAMP_FORMAT),
        end.format(WHERE_TIMESTAMP_FORMAT),
    )
}

async fn get_incidents(url: &str, label: &str) -> Result<Vec<RawIncident>, SourceError> {
    log::info!("Fetching {label} data: {url}");

    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("{label} responded with HTTP {status}");
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    let records: Vec<RawIncident> = serde_json::from_str(&body)?;

    log::info!("Downloaded {} {label} records", records.len());
    Ok(records)
}

/// Fetches the most recent records.
///
/// Uses [`SourceConfig::effective_limit`] when `limit` is `None`.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the request fails,
/// [`SourceError::Status`] on a non-success response, and
/// [`SourceError::Json`] if the body is not an array of records.
pub async fn fetch_incidents(
    config: &SourceConfig,
    limit: Option<u64>,
) -> Result<Vec<RawIncident>, SourceError> {
    let limit = limit.unwrap_or_else(|| config.effective_limit());
    get_incidents(&latest_url(config, limit), &config.name).await
}

/// Fetches records received inside a time window.
///
/// Uses [`SourceConfig::effective_limit`] when `limit` is `None`.
///
/// # Errors
///
/// Same as [`fetch_incidents`].
pub async fn fetch_incidents_between(
    config: &SourceConfig,
    start: NaiveDateTime,
    end: NaiveDateTime,
    limit: Option<u64>,
) -> Result<Vec<RawIncident>, SourceError> {
    let limit = limit.unwrap_or_else(|| config.effective_limit());
    get_incidents(&between_url(config, start, end, limit), &config.name).await
}
