//! Configuration loader
//!
//! Loads the sync configuration from a file and resolves `{{ NAME }}`
//! placeholders in credential values from the environment.
//!
//! ## Formats
//! Detected by file extension: `.yml`/`.yaml` (also the default for files
//! without an extension), `.json` and `.toml`.
//!
//! ## Environment placeholders
//! A credential or API key whose entire value is `{{ NAME }}` is replaced by
//! the value of the environment variable `NAME` (empty when unset). Other
//! values are used as written.
//!
//! ## File Locations
//! When no path is given the loader probes (in order):
//! 1. `./config.yml`, `./config.yaml`, `./reportsync.yml`, `./reportsync.yaml`,
//!    `./config.json`, `./config.toml` (current working directory)
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use reportsync_domain::{Config, ConfigError, Result, SyncError};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: &[&str] = &[
    "config.yml",
    "config.yaml",
    "reportsync.yml",
    "reportsync.yaml",
    "config.json",
    "config.toml",
];

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\{\{\s*([A-Za-z0-9_]+)\s*\}\}\s*$")
        .expect("PLACEHOLDER regex should compile - this is a bug")
});

/// Load configuration from a file and resolve environment placeholders.
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`].
///
/// # Errors
/// Returns `SyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(file_error(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            file_error("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| file_error(format!("Failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    resolve_placeholders(&mut config);
    Ok(config)
}

/// Load configuration and validate it before any network call is made.
pub fn load_and_validate(path: Option<PathBuf>) -> Result<Config> {
    let config = load_from_file(path)?;
    config.validate()?;
    tracing::debug!(entries = config.entries.len(), "Configuration validated");
    Ok(config)
}

/// Parse configuration from string content, detecting the format from the
/// file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("yml");

    match extension.to_ascii_lowercase().as_str() {
        "yml" | "yaml" => serde_yaml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| file_error(format!("Invalid JSON format: {e}"))),
        other => Err(file_error(format!("Unsupported config format: {other}"))),
    }
}

/// Replace whole-value `{{ NAME }}` placeholders in the credential fields.
pub fn resolve_placeholders(config: &mut Config) {
    let credentials = &mut config.reporting;
    for value in [
        &mut credentials.app_id,
        &mut credentials.tenant_id,
        &mut credentials.client_id,
        &mut credentials.client_secret,
        &mut config.datasets.api_key,
    ] {
        if let Some(resolved) = env_placeholder(value) {
            *value = resolved;
        }
    }
}

fn env_placeholder(value: &str) -> Option<String> {
    let name = PLACEHOLDER.captures(value)?.get(1)?.as_str();
    let resolved = std::env::var(name).unwrap_or_default();
    if resolved.is_empty() {
        tracing::warn!(variable = name, "Config placeholder refers to an unset variable");
    }
    Some(resolved)
}

/// Write a template config, refusing to overwrite an existing file.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(file_error(format!(
            "{} already exists, rename or delete it or pass --config to choose another path",
            path.display()
        )));
    }

    let yaml = serde_yaml::to_string(&template()).map_err(InfraError::from)?;
    std::fs::write(path, yaml)
        .map_err(|e| file_error(format!("Failed to write config file: {e}")))?;

    tracing::info!(path = %path.display(), "Template configuration written");
    Ok(())
}

fn template() -> Config {
    use reportsync_domain::{
        DatasetApiConfig, DatasetDirectives, Entry, ParameterBinding, ReportSelector,
        ReportingCredentials,
    };

    Config {
        time_location: "America/New_York".into(),
        refresh_time: 3600,
        reporting: ReportingCredentials {
            app_id: "{{ ST_APP_ID }}".into(),
            tenant_id: "{{ ST_TENANT_ID }}".into(),
            client_id: "{{ ST_CLIENT_ID }}".into(),
            client_secret: "{{ ST_CLIENT_SECRET }}".into(),
            auth_url: None,
            base_url: None,
        },
        datasets: DatasetApiConfig { api_key: "{{ GB_API_KEY }}".into(), base_url: None },
        entries: vec![
            Entry {
                report: ReportSelector {
                    id: "123".into(),
                    category_id: "category-a".into(),
                    parameters: vec![
                        ParameterBinding { name: "From".into(), value: "NOW-7".into() },
                        ParameterBinding { name: "To".into(), value: "NOW".into() },
                    ],
                },
                dataset: DatasetDirectives {
                    name: "my-dataset-name".into(),
                    write_mode: "replace".into(),
                    required_fields: vec!["Name".into()],
                    field_overrides: Vec::new(),
                },
            },
            Entry {
                report: ReportSelector {
                    id: "345".into(),
                    category_id: "category-b".into(),
                    parameters: Vec::new(),
                },
                dataset: DatasetDirectives {
                    name: "revenue-income".into(),
                    write_mode: "append".into(),
                    required_fields: vec!["Invoice".into()],
                    field_overrides: Vec::new(),
                },
            },
        ],
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
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

fn file_error(message: impl Into<String>) -> SyncError {
    ConfigError::single("file", message).into()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const YAML: &str = r#"
time_location: Europe/London
refresh_time: 600
servicetitan:
  app_id: "{{ RS_TEST_APP_ID }}"
  tenant_id: "1234"
  client_id: "{{RS_TEST_CLIENT_ID}}"
  client_secret: "prefix-{{ RS_TEST_SECRET }}"
geckoboard:
  api_key: "{{ RS_TEST_MISSING_KEY }}"
entries:
  - report:
      id: 2222
      category_id: operations
      parameters:
        - name: From
          value: NOW-7
    dataset:
      type: append
      required_fields: [Name]
"#;

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_resolves_placeholders() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("RS_TEST_APP_ID", "app-from-env");
        std::env::set_var("RS_TEST_CLIENT_ID", "client-from-env");
        std::env::set_var("RS_TEST_SECRET", "never-used");
        std::env::remove_var("RS_TEST_MISSING_KEY");

        let path = temp_config(YAML, "yml");
        let config = load_from_file(Some(path.clone())).unwrap();

        assert_eq!(config.reporting.app_id, "app-from-env");
        assert_eq!(config.reporting.tenant_id, "1234");
        assert_eq!(config.reporting.client_id, "client-from-env");
        assert_eq!(config.reporting.client_secret, "prefix-{{ RS_TEST_SECRET }}");
        assert_eq!(config.datasets.api_key, "");
        assert_eq!(config.refresh_time, 600);
        assert_eq!(config.entries[0].report.id, "2222");

        std::env::remove_var("RS_TEST_APP_ID");
        std::env::remove_var("RS_TEST_CLIENT_ID");
        std::env::remove_var("RS_TEST_SECRET");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_and_validate_reports_unresolved_key() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("RS_TEST_APP_ID", "app");
        std::env::set_var("RS_TEST_CLIENT_ID", "client");
        std::env::remove_var("RS_TEST_MISSING_KEY");

        let path = temp_config(YAML, "yaml");
        let err = load_and_validate(Some(path.clone())).unwrap_err();

        assert_eq!(err.to_string(), "Config section \"geckoboard\" errors:\n - missing api_key");

        std::env::remove_var("RS_TEST_APP_ID");
        std::env::remove_var("RS_TEST_CLIENT_ID");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "reporting": {"app_id": "a", "tenant_id": "t", "client_id": "c", "client_secret": "s"},
            "datasets": {"api_key": "k"},
            "entries": [{
                "report": {"id": "1", "category_id": "ops"},
                "dataset": {"required_fields": ["Name"]}
            }]
        }"#;

        let path = temp_config(json_content, "json");
        let config = load_and_validate(Some(path.clone())).unwrap();

        assert_eq!(config.reporting.client_secret, "s");
        assert_eq!(config.refresh_time, 0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
refresh_time = 30

[reporting]
app_id = "a"
tenant_id = "t"
client_id = "c"
client_secret = "s"

[datasets]
api_key = "k"

[[entries]]
report = { id = "9", category_id = "sales" }
dataset = { name = "Sales", type = "replace", required_fields = ["Name"] }
"#;

        let path = temp_config(toml_content, "toml");
        let config = load_and_validate(Some(path.clone())).unwrap();

        assert_eq!(config.refresh_time, 30);
        assert_eq!(config.entries[0].dataset.name, "Sales");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/config.yml"))).unwrap_err();
        match err {
            SyncError::Config(config) => assert_eq!(config.scope(), "file"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let path = temp_config("entries: [", "yml");
        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert_eq!(err.kind(), "config");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.ini"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_parse_config_defaults_to_yaml() {
        let config = parse_config("refresh_time: 5\n", &PathBuf::from("config")).unwrap();
        assert_eq!(config.refresh_time, 5);
    }

    #[test]
    fn test_probe_config_paths_returns_none_when_missing() {
        // A dev environment may legitimately have a config file nearby.
        let result = probe_config_paths();
        assert!(result.is_none() || result.unwrap().exists());
    }

    #[test]
    fn test_template_round_trips_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");

        write_template(&path).unwrap();
        let config = parse_config(&std::fs::read_to_string(&path).unwrap(), &path).unwrap();
        assert_eq!(config.entries.len(), 2);
        assert_eq!(config.reporting.app_id, "{{ ST_APP_ID }}");

        let err = write_template(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
