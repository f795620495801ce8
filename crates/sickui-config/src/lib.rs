//! Shared configuration for the sickui CLI.
//!
//! Two separate concerns live here:
//!
//! - [`project`]: the consumer project's `components.json`: discovery by
//!   walking up from the working directory, loading, saving, and resolving
//!   import aliases to filesystem paths.
//! - [`settings`]: the tool's own settings (registry location, timeout),
//!   layered from defaults, an optional TOML file and `SICKUI_*` env vars.

pub mod project;
pub mod settings;

use thiserror::Error;

pub use project::{
    Aliases, COMPONENTS_JSON, ProjectConfig, ResolvedConfig, ResolvedPaths, TailwindConfig,
    find_project_config, load_project_config, resolve_import, save_project_config,
};
pub use settings::{Settings, load_settings, load_settings_from, settings_path};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no components.json found in {searched} or any parent directory")]
    NotFound { searched: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
