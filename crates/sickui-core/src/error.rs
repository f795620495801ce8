// ── Core error types ──
//
// User-facing error kinds for the core crate. Consumers never see raw
// reqwest or figment errors: the `From` impls below translate registry and
// configuration failures into domain variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Project errors ───────────────────────────────────────────────
    #[error("The path {} does not exist", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("Configuration is missing: {message}")]
    ConfigMissing { message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Invalid component name {name:?}: {reason}")]
    InvalidComponentName { name: String, reason: &'static str },

    // ── Registry errors ──────────────────────────────────────────────
    #[error("Registry unavailable: {message}")]
    RegistryUnavailable { message: String },

    #[error("Registry payload rejected: {message}")]
    RegistrySchemaMismatch { message: String },

    // ── Filesystem errors ────────────────────────────────────────────
    #[error("Cannot update stylesheet {}: {source}", .path.display())]
    CssMergeIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Package manager errors ───────────────────────────────────────
    #[error("`{command}` failed: {reason}")]
    DependencyInstall { command: String, reason: String },

    // ── Interactive errors ───────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl CoreError {
    /// Returns `true` for registry-side failures.
    pub fn is_registry(&self) -> bool {
        matches!(
            self,
            Self::RegistryUnavailable { .. } | Self::RegistrySchemaMismatch { .. }
        )
    }
}

// ── Conversion from lower-layer errors ───────────────────────────────

impl From<sickui_registry::Error> for CoreError {
    fn from(err: sickui_registry::Error) -> Self {
        match err {
            sickui_registry::Error::SchemaMismatch { url, message } => {
                CoreError::RegistrySchemaMismatch {
                    message: format!("{url}: {message}"),
                }
            }
            other => CoreError::RegistryUnavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<sickui_config::ConfigError> for CoreError {
    fn from(err: sickui_config::ConfigError) -> Self {
        match err {
            sickui_config::ConfigError::NotFound { .. } => CoreError::ConfigMissing {
                message: err.to_string(),
            },
            other => CoreError::Config {
                message: other.to_string(),
            },
        }
    }
}
