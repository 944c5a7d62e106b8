//! Configuration structures
//!
//! Every section deserializes with defaults so a partial file (or none at
//! all) still yields a usable `Config`. Credentials stay optional here; the
//! credential cache reports them missing on first use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONSULTANTS_LIST_KEY, DEFAULT_CONSULTANTS_PATH, DEFAULT_HOURS_PER_DAY,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PROJECTS_LIST_KEY, DEFAULT_PROJECTS_PATH, DEFAULT_SCOPE,
    DEFAULT_TOKEN_PATH,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub halo: HaloConfig,
    pub calendar: CalendarConfig,
    pub mapping: FieldMappingConfig,
}

/// Remote PSA connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    pub base_url: Option<String>,
    /// Token host when it differs from the data host
    pub auth_base_url: Option<String>,
    pub token_path: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: String,
    pub timeout_seconds: u64,
    pub consultants: EndpointConfig,
    pub projects: EndpointConfig,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_base_url: None,
            token_path: DEFAULT_TOKEN_PATH.to_string(),
            client_id: None,
            client_secret: None,
            scope: DEFAULT_SCOPE.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            consultants: EndpointConfig::new(DEFAULT_CONSULTANTS_PATH, DEFAULT_CONSULTANTS_LIST_KEY),
            projects: EndpointConfig::new(DEFAULT_PROJECTS_PATH, DEFAULT_PROJECTS_LIST_KEY),
        }
    }
}

impl HaloConfig {
    /// Host used for the token request
    pub fn token_base_url(&self) -> Option<&str> {
        self.auth_base_url.as_deref().or(self.base_url.as_deref())
    }
}

/// One list endpoint on the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub path: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    /// Wrapper key holding this endpoint's records
    pub list_key: String,
}

impl EndpointConfig {
    pub fn new(path: &str, list_key: &str) -> Self {
        Self { path: path.to_string(), query: BTreeMap::new(), list_key: list_key.to_string() }
    }

    /// Query parameters as owned pairs, in key order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Calendar computation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub default_hours_per_day: f64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { default_hours_per_day: DEFAULT_HOURS_PER_DAY }
    }
}

/// Remote field names per logical attribute
///
/// Each value is a dot-separated path into the raw record, so nested
/// fields such as `client.name` can be addressed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMappingConfig {
    pub consultant: ConsultantFields,
    pub project: ProjectFields,
    pub type_labels: TypeLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultantFields {
    pub id: String,
    pub name: String,
    pub hours_per_day: String,
}

impl Default for ConsultantFields {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            name: "name".to_string(),
            hours_per_day: "hours_per_day".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFields {
    pub id: String,
    pub name: String,
    pub customer: String,
    pub type_field: String,
    pub budget: String,
    pub start_date: String,
    pub end_date: String,
}

impl Default for ProjectFields {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            name: "name".to_string(),
            customer: "customer".to_string(),
            type_field: "type".to_string(),
            budget: "budget_hours".to_string(),
            start_date: "start_date".to_string(),
            end_date: "end_date".to_string(),
        }
    }
}

/// Remote values that identify each project type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeLabels {
    pub scooped: String,
    pub retainer: String,
    pub request: String,
}

impl Default for TypeLabels {
    fn default() -> Self {
        Self {
            scooped: "scooped".to_string(),
            retainer: "retainer".to_string(),
            request: "request".to_string(),
        }
    }
}
