//! Application constants
//!
//! Centralized location for domain-level defaults used throughout the
//! application.

// Capacity defaults
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;
pub const DEFAULT_THRESHOLD_HOURS: f64 = 8.0;

// Credential cache
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 30;
pub const MIN_TOKEN_LIFETIME_SECS: i64 = 60;
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

// Remote API defaults
pub const DEFAULT_TOKEN_PATH: &str = "auth/token";
pub const DEFAULT_SCOPE: &str = "all";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONSULTANTS_PATH: &str = "api/Agent";
pub const DEFAULT_CONSULTANTS_LIST_KEY: &str = "agents";
pub const DEFAULT_PROJECTS_PATH: &str = "api/Projects";
pub const DEFAULT_PROJECTS_LIST_KEY: &str = "projects";

/// Generic envelope keys tried after the endpoint's own list key.
pub const GENERIC_ENVELOPE_KEYS: [&str; 3] = ["items", "results", "data"];

/// Accepted shape of a holiday entry.
pub const HOLIDAY_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
