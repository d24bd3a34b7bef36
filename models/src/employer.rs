//! Employer console list items and their filters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostCenterState {
    #[serde(rename = "ACTIVE_CC")]
    Active,
    #[serde(rename = "DEFUNCT_CC")]
    Defunct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub state: CostCenterState,
}

/// Body filter for `employer/get-cost-centers`.
///
/// An empty `states` list means active cost centers only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostCenterFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<CostCenterState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationState {
    #[serde(rename = "ACTIVE_LOCATION")]
    Active,
    #[serde(rename = "DEFUNCT_LOCATION")]
    Defunct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
    pub country_code: String,
    pub postal_address: String,
    pub postal_code: String,
    #[serde(default)]
    pub openstreetmap_url: Option<String>,
    #[serde(default)]
    pub city_aka: Vec<String>,
    pub state: LocationState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<LocationState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgUserState {
    #[serde(rename = "ACTIVE_ORG_USER")]
    Active,
    #[serde(rename = "ADDED_ORG_USER")]
    Added,
    #[serde(rename = "DISABLED_ORG_USER")]
    Disabled,
    #[serde(rename = "REPLICATED_ORG_USER")]
    Replicated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub state: OrgUserState,
}

/// Body filter for `employer/filter-org-users`. Org users paginate by email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrgUserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<OrgUserState>,
}
