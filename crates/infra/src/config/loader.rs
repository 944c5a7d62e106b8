//! Configuration loader
//!
//! Loads application configuration from a file and environment variables.
//!
//! ## Loading Strategy
//! 1. Start from an explicit file, the first probed file, or defaults
//! 2. Apply environment variable overrides on top
//! 3. Supports JSON and TOML formats
//!
//! Missing credentials are not a load error. They are reported by the
//! credential cache on the first authenticated call.
//!
//! ## Environment Variables
//! - `HALO_BASE_URL`: Data API base URL
//! - `HALO_AUTH_BASE_URL`: Token host when it differs from the data host
//! - `HALO_TOKEN_PATH`: Token endpoint path (default `auth/token`)
//! - `HALO_CLIENT_ID` / `HALO_CLIENT_SECRET`: Client credentials
//! - `HALO_SCOPE`: OAuth scope (default `all`)
//! - `HALO_TIMEOUT_SECONDS`: Per-request timeout
//! - `CAPACAL_DEFAULT_HOURS_PER_DAY`: Capacity of a consultant without hours
//! - `CAPACAL_FIELD_<ENTITY>_<ATTR>`: Remote field name overrides, e.g.
//!   `CAPACAL_FIELD_PROJECT_START_DATE=startdate`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./capacal.{toml,json}` then `./config.{toml,json}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use capacal_domain::{CapacalError, Config, FieldMappingConfig, Result};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] = ["capacal.toml", "capacal.json", "config.toml", "config.json"];

const FIELD_ENV_PREFIX: &str = "CAPACAL_FIELD_";

const FIELD_OVERRIDE_KEYS: [&str; 10] = [
    "CONSULTANT_ID",
    "CONSULTANT_NAME",
    "CONSULTANT_HOURS_PER_DAY",
    "PROJECT_ID",
    "PROJECT_NAME",
    "PROJECT_CUSTOMER",
    "PROJECT_TYPE",
    "PROJECT_BUDGET",
    "PROJECT_START_DATE",
    "PROJECT_END_DATE",
];

/// Load configuration from an optional file plus environment overrides
///
/// With `path` set the file must exist. Without it the standard locations
/// are probed and defaults are used when nothing is found.
///
/// # Errors
/// Returns `CapacalError::Config` if:
/// - The explicit file does not exist
/// - File format is invalid
/// - A numeric environment variable cannot be parsed
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(Some(path))?,
        None => match probe_config_paths() {
            Some(found) => load_from_file(Some(found))?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Defaults with environment overrides applied
///
/// # Errors
/// Returns `CapacalError::Config` if a numeric variable is invalid.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CapacalError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CapacalError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CapacalError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CapacalError::from(InfraError::from(e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `CapacalError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CapacalError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CapacalError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CapacalError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its parent and grandparent, then the
/// executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Apply `HALO_*` and `CAPACAL_*` environment variables to `config`
///
/// Unset or blank variables leave the current value untouched.
///
/// # Errors
/// Returns `CapacalError::Config` for unparsable numeric values.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    let halo = &mut config.halo;

    if let Some(value) = env_value("HALO_BASE_URL") {
        halo.base_url = Some(value);
    }
    if let Some(value) = env_value("HALO_AUTH_BASE_URL") {
        halo.auth_base_url = Some(value);
    }
    if let Some(value) = env_value("HALO_TOKEN_PATH") {
        halo.token_path = value;
    }
    if let Some(value) = env_value("HALO_CLIENT_ID") {
        halo.client_id = Some(value);
    }
    if let Some(value) = env_value("HALO_CLIENT_SECRET") {
        halo.client_secret = Some(value);
    }
    if let Some(value) = env_value("HALO_SCOPE") {
        halo.scope = value;
    }
    if let Some(value) = env_value("HALO_TIMEOUT_SECONDS") {
        halo.timeout_seconds = value.parse::<u64>().map_err(|e| {
            CapacalError::Config(format!("Invalid HALO_TIMEOUT_SECONDS: {}", e))
        })?;
    }

    if let Some(value) = env_value("CAPACAL_DEFAULT_HOURS_PER_DAY") {
        let hours = value.parse::<f64>().map_err(|e| {
            CapacalError::Config(format!("Invalid CAPACAL_DEFAULT_HOURS_PER_DAY: {}", e))
        })?;
        if !hours.is_finite() || hours < 0.0 {
            return Err(CapacalError::Config(format!(
                "Invalid CAPACAL_DEFAULT_HOURS_PER_DAY: {}",
                value
            )));
        }
        config.calendar.default_hours_per_day = hours;
    }

    for key in FIELD_OVERRIDE_KEYS {
        if let Some(value) = env_value(&format!("{FIELD_ENV_PREFIX}{key}")) {
            if let Some(slot) = field_slot(&mut config.mapping, key) {
                *slot = value;
            }
        }
    }

    Ok(())
}

fn field_slot<'a>(mapping: &'a mut FieldMappingConfig, key: &str) -> Option<&'a mut String> {
    let slot = match key {
        "CONSULTANT_ID" => &mut mapping.consultant.id,
        "CONSULTANT_NAME" => &mut mapping.consultant.name,
        "CONSULTANT_HOURS_PER_DAY" => &mut mapping.consultant.hours_per_day,
        "PROJECT_ID" => &mut mapping.project.id,
        "PROJECT_NAME" => &mut mapping.project.name,
        "PROJECT_CUSTOMER" => &mut mapping.project.customer,
        "PROJECT_TYPE" => &mut mapping.project.type_field,
        "PROJECT_BUDGET" => &mut mapping.project.budget,
        "PROJECT_START_DATE" => &mut mapping.project.start_date,
        "PROJECT_END_DATE" => &mut mapping.project.end_date,
        _ => return None,
    };
    Some(slot)
}

/// Trimmed value of an environment variable, `None` when unset or blank
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 8] = [
        "HALO_BASE_URL",
        "HALO_AUTH_BASE_URL",
        "HALO_TOKEN_PATH",
        "HALO_CLIENT_ID",
        "HALO_CLIENT_SECRET",
        "HALO_SCOPE",
        "HALO_TIMEOUT_SECONDS",
        "CAPACAL_DEFAULT_HOURS_PER_DAY",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
        for key in FIELD_OVERRIDE_KEYS {
            std::env::remove_var(format!("{FIELD_ENV_PREFIX}{key}"));
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_overrides_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HALO_BASE_URL", "https://psa.example.com");
        std::env::set_var("HALO_AUTH_BASE_URL", "https://auth.example.com");
        std::env::set_var("HALO_TOKEN_PATH", "oauth2/token");
        std::env::set_var("HALO_CLIENT_ID", "calendar");
        std::env::set_var("HALO_CLIENT_SECRET", "s3cret");
        std::env::set_var("HALO_SCOPE", "read:projects");
        std::env::set_var("HALO_TIMEOUT_SECONDS", "12");
        std::env::set_var("CAPACAL_DEFAULT_HOURS_PER_DAY", "7.5");
        std::env::set_var("CAPACAL_FIELD_PROJECT_START_DATE", "startdate");
        std::env::set_var("CAPACAL_FIELD_CONSULTANT_NAME", "  ");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.halo.base_url.as_deref(), Some("https://psa.example.com"));
        assert_eq!(config.halo.token_base_url(), Some("https://auth.example.com"));
        assert_eq!(config.halo.token_path, "oauth2/token");
        assert_eq!(config.halo.client_id.as_deref(), Some("calendar"));
        assert_eq!(config.halo.client_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.halo.scope, "read:projects");
        assert_eq!(config.halo.timeout_seconds, 12);
        assert_eq!(config.calendar.default_hours_per_day, 7.5);
        assert_eq!(config.mapping.project.start_date, "startdate");
        assert_eq!(config.mapping.consultant.name, "name");

        clear_env();
    }

    #[test]
    fn test_missing_credentials_are_not_a_load_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let config = load_from_env().unwrap();
        assert!(config.halo.base_url.is_none());
        assert!(config.halo.client_id.is_none());
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HALO_TIMEOUT_SECONDS", "soon");
        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CapacalError::Config(_)), "Should be a Config error");

        clear_env();
        std::env::set_var("CAPACAL_DEFAULT_HOURS_PER_DAY", "-2");
        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CapacalError::Config(_)), "Should be a Config error");

        clear_env();
    }

    #[test]
    fn test_env_overrides_file_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let path = temp_config(
            r#"
[halo]
base_url = "https://file.example.com"
client_id = "from-file"

[calendar]
default_hours_per_day = 6.0
"#,
            "toml",
        );
        std::env::set_var("HALO_CLIENT_ID", "from-env");

        let config = load(Some(path.clone())).unwrap();
        assert_eq!(config.halo.base_url.as_deref(), Some("https://file.example.com"));
        assert_eq!(config.halo.client_id.as_deref(), Some("from-env"));
        assert_eq!(config.calendar.default_hours_per_day, 6.0);

        clear_env();
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let path = temp_config(
            r#"{
                "halo": {
                    "base_url": "https://psa.example.com",
                    "projects": {"path": "api/Projects", "list_key": "projects", "query": {"includeclosed": "false"}}
                },
                "mapping": {"type_labels": {"retainer": "Managed Service"}}
            }"#,
            "json",
        );

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from JSON file");

        let config = result.unwrap();
        assert_eq!(config.halo.base_url.as_deref(), Some("https://psa.example.com"));
        assert_eq!(config.halo.projects.query_pairs(), vec![("includeclosed".to_string(), "false".to_string())]);
        assert_eq!(config.mapping.type_labels.retainer, "Managed Service");
        assert_eq!(config.halo.consultants.path, "api/Agent");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/capacal.toml")));
        assert!(result.is_err(), "Should fail when file not found");

        let err = result.unwrap_err();
        assert!(matches!(err, CapacalError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = temp_config(r#"{ "this is": "not valid json" "#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let content = "some content";
        let path = PathBuf::from("test.yaml");
        let result = parse_config(content, &path);
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_unknown_field_key_has_no_slot() {
        let mut mapping = FieldMappingConfig::default();
        assert!(field_slot(&mut mapping, "PROJECT_COLOUR").is_none());
        for key in FIELD_OVERRIDE_KEYS {
            assert!(field_slot(&mut mapping, key).is_some(), "{key} should map to a field");
        }
    }
}
