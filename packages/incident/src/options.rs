//! Discovery of the values each filter can choose from.

use std::collections::BTreeSet;

use cad_dashboard_incident_models::{EnrichedIncident, IncidentField};
use serde::{Deserialize, Serialize};

/// Returns the sorted distinct non-empty values of `field` across `incidents`.
#[must_use]
pub fn unique_values(incidents: &[EnrichedIncident], field: IncidentField) -> Vec<String> {
    incidents
        .iter()
        .filter_map(|incident| field.value(&incident.incident))
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Available choices for every inclusion filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Call type descriptions.
    pub call_types: Vec<String>,
    /// Priority codes.
    pub priorities: Vec<String>,
    /// Police districts.
    pub districts: Vec<String>,
    /// Agencies.
    pub agencies: Vec<String>,
}

impl FilterOptions {
    /// Collects the options from the full (unfiltered) incident batch.
    #[must_use]
    pub fn from_incidents(incidents: &[EnrichedIncident]) -> Self {
        Self {
            call_types: unique_values(incidents, IncidentField::CallType),
            priorities: unique_values(incidents, IncidentField::Priority),
            districts: unique_values(incidents, IncidentField::District),
            agencies: unique_values(incidents, IncidentField::Agency),
        }
    }

    /// Returns the options for a single field.
    #[must_use]
    pub fn for_field(&self, field: IncidentField) -> &[String] {
        match field {
            IncidentField::CallType => &self.call_types,
            IncidentField::Priority => &self.priorities,
            IncidentField::District => &self.districts,
            IncidentField::Agency => &self.agencies,
        }
    }
}
