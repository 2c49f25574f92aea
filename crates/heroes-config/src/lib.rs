//! Configuration for the heroes client.
//!
//! A flat TOML file, overridable by `HEROES_*` environment variables,
//! translated into `heroes_core::ServiceConfig`. The TUI layers its own
//! command-line flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use heroes_core::ServiceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the hero service (e.g., "http://localhost:3000").
    #[serde(default = "default_url")]
    pub url: String,

    /// Collection path below `url`.
    #[serde(default = "default_collection_path")]
    pub collection_path: String,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Search-box debounce in milliseconds.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            collection_path: default_collection_path(),
            timeout: None,
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3000".into()
}
fn default_collection_path() -> String {
    "api/heroes".into()
}
fn default_search_debounce_ms() -> u64 {
    300
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "heroes", "heroes").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("heroes");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an
/// error: defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HEROES_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ServiceConfig` from a loaded Config.
pub fn to_service_config(cfg: &Config) -> Result<ServiceConfig, ConfigError> {
    let url: url::Url = cfg.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", cfg.url),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("not a base URL: {}", cfg.url),
        });
    }

    let mut service = ServiceConfig::new(url);
    service.collection_path.clone_from(&cfg.collection_path);
    service.timeout = cfg.timeout.filter(|secs| *secs > 0).map(Duration::from_secs);
    service.search_debounce = Duration::from_millis(cfg.search_debounce_ms);
    Ok(service)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
            url = "http://heroes.test:8080"
            timeout = 5
            "#,
        );

        let cfg = load_config_from(file.path()).unwrap();

        assert_eq!(cfg.url, "http://heroes.test:8080");
        assert_eq!(cfg.timeout, Some(5));
        assert_eq!(cfg.collection_path, "api/heroes");
        assert_eq!(cfg.search_debounce_ms, 300);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("timeout = \"soon\"");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn service_config_carries_every_field() {
        let cfg = Config {
            url: "http://heroes.test".into(),
            collection_path: "v2/heroes".into(),
            timeout: Some(10),
            search_debounce_ms: 50,
        };

        let service = to_service_config(&cfg).unwrap();

        assert_eq!(service.url.as_str(), "http://heroes.test/");
        assert_eq!(service.collection_path, "v2/heroes");
        assert_eq!(service.timeout, Some(Duration::from_secs(10)));
        assert_eq!(service.search_debounce, Duration::from_millis(50));
    }

    #[test]
    fn zero_timeout_means_none() {
        let cfg = Config {
            timeout: Some(0),
            ..Config::default()
        };
        assert_eq!(to_service_config(&cfg).unwrap().timeout, None);
    }

    #[test]
    fn bad_url_is_rejected() {
        for url in ["not a url", "mailto:heroes@example.com"] {
            let cfg = Config {
                url: url.into(),
                ..Config::default()
            };
            assert!(matches!(
                to_service_config(&cfg),
                Err(ConfigError::Validation { ref field, .. }) if field == "url"
            ));
        }
    }

    #[test]
    fn config_path_ends_with_file_name() {
        assert!(config_path().ends_with("config.toml"));
    }
}
