// ── Tool settings ──
//
// Where the registry lives and how long to wait for it. Layered with
// figment: built-in defaults < `config.toml` < `SICKUI_*` env vars. CLI
// flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ConfigError;

pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/kartikver15gr8/SickUI/main/registry";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL serving `index.json` and `{name}.json`.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Optional base URL serving raw component source files.
    #[serde(default)]
    pub raw_url: Option<String>,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            raw_url: None,
            timeout: default_timeout(),
        }
    }
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.into()
}
fn default_timeout() -> u64 {
    30
}

impl Settings {
    /// Parsed registry base URL.
    pub fn registry_url(&self) -> Result<Url, ConfigError> {
        parse_url("registry_url", &self.registry_url)
    }

    /// Parsed raw-source base URL, if configured.
    pub fn raw_url(&self) -> Result<Option<Url>, ConfigError> {
        self.raw_url
            .as_deref()
            .map(|raw| parse_url("raw_url", raw))
            .transpose()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    value.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{value}': {e}"),
    })
}

// ── Loading ─────────────────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn settings_path() -> PathBuf {
    ProjectDirs::from("com", "sickui", "sickui").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("sickui");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load settings from the canonical path plus environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&settings_path())
}

/// Load settings from an explicit TOML path plus environment.
///
/// A missing file is not an error: figment treats it as an empty layer.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let settings: Settings = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SICKUI_"))
        .extract()?;
    Ok(settings)
}
