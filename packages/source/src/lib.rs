#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fetching CAD dispatch records from a Socrata open data portal.
//!
//! A [`SourceConfig`] describes one dataset. Configs ship embedded in the
//! binary (see [`registry`]) and can also be parsed from custom TOML with
//! [`parse_source_toml`].

pub mod config;
pub mod registry;
pub mod socrata;

pub use config::{LIMIT_ENV_VAR, SourceConfig, parse_source_toml};
pub use socrata::{fetch_incidents, fetch_incidents_between};

/// Errors that can occur while loading configs or fetching records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal answered with a non-success status.
    #[error("HTTP error! status: {status} ({url})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A config parsed but is unusable.
    #[error("Invalid source config: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}
