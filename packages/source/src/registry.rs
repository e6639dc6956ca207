//! Source registry. Loads every source definition from embedded TOML.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a source means adding a TOML
//! file and an entry in the list below.

use crate::config::{SourceConfig, parse_source_toml};

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[("sf_cad", include_str!("../sources/sf_cad.toml"))];

/// Identifier of the source used when the caller does not pick one.
pub const DEFAULT_SOURCE_ID: &str = "sf_cad";

/// Returns all configured source definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_sources() -> Vec<SourceConfig> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_source_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up a configured source by id.
#[must_use]
pub fn source_by_id(id: &str) -> Option<SourceConfig> {
    all_sources().into_iter().find(|source| source.id == id)
}
