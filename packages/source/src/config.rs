//! Source definitions loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::SourceError;

/// Environment variable that overrides [`SourceConfig::default_limit`].
pub const LIMIT_ENV_VAR: &str = "CAD_DASHBOARD_LIMIT";

const fn default_limit() -> u64 {
    10
}

fn default_date_column() -> String {
    "received_datetime".to_string()
}

/// One Socrata dataset of dispatched calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Unique identifier (e.g. `"sf_cad"`).
    pub id: String,
    /// Human-readable name, used in log messages.
    pub name: String,
    /// SODA resource endpoint.
    pub api_url: String,
    /// Dataset landing page.
    #[serde(default)]
    pub portal_url: Option<String>,
    /// Timestamp column used for ordering and date windows.
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Number of records requested when the caller gives no limit.
    #[serde(default = "default_limit")]
    pub default_limit: u64,
}

impl SourceConfig {
    /// The limit to request when none is given explicitly.
    ///
    /// Honors [`LIMIT_ENV_VAR`] when it holds a positive integer.
    #[must_use]
    pub fn effective_limit(&self) -> u64 {
        self.resolve_limit(std::env::var(LIMIT_ENV_VAR).ok().as_deref())
    }

    /// Applies an override value to [`Self::default_limit`].
    ///
    /// Values that are not positive integers are ignored with a warning.
    #[must_use]
    pub fn resolve_limit(&self, value: Option<&str>) -> u64 {
        let Some(value) = value else {
            return self.default_limit;
        };
        match value.trim().parse::<u64>() {
            Ok(limit) if limit > 0 => limit,
            _ => {
                log::warn!(
                    "Ignoring {LIMIT_ENV_VAR}={value:?}, using default limit {}",
                    self.default_limit
                );
                self.default_limit
            }
        }
    }
}

/// Parses and validates a source definition.
///
/// # Errors
///
/// Returns [`SourceError::Toml`] if the TOML is malformed and
/// [`SourceError::Config`] if a required value is empty or zero.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceConfig, SourceError> {
    let config: SourceConfig = toml::from_str(toml_str)?;

    if config.id.trim().is_empty() {
        return Err(SourceError::Config {
            message: "id must not be empty".to_string(),
        });
    }
    if config.api_url.trim().is_empty() {
        return Err(SourceError::Config {
            message: format!("{}: api_url must not be empty", config.id),
        });
    }
    if config.default_limit == 0 {
        return Err(SourceError::Config {
            message: format!("{}: default_limit must be positive", config.id),
        });
    }

    Ok(config)
}
