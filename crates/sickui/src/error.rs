//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sickui_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Project ──────────────────────────────────────────────────────
    #[error("The path {path} does not exist")]
    #[diagnostic(code(sickui::path_not_found), help("Pass an existing directory with --cwd."))]
    PathNotFound { path: String },

    #[error("Configuration is missing")]
    #[diagnostic(
        code(sickui::config_missing),
        help("Run sickui init to create a components.json file.")
    )]
    ConfigMissing,

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(sickui::config))]
    Config { message: String },

    // ── Registry ─────────────────────────────────────────────────────
    #[error("Could not reach the component registry")]
    #[diagnostic(
        code(sickui::registry_unavailable),
        help("{message}\nCheck your connection, or point --registry-url at a reachable registry.")
    )]
    RegistryUnavailable { message: String },

    #[error("The registry returned an unexpected payload")]
    #[diagnostic(code(sickui::registry_schema), help("{message}"))]
    RegistrySchemaMismatch { message: String },

    #[error("Component '{name}' not found in registry")]
    #[diagnostic(code(sickui::not_found), help("Run: sickui list to see available components"))]
    NotFound { name: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid component name '{name}'")]
    #[diagnostic(code(sickui::validation), help("{reason}"))]
    InvalidComponentName { name: String, reason: String },

    // ── Installation ─────────────────────────────────────────────────
    #[error("Failed to install dependencies")]
    #[diagnostic(code(sickui::install), help("`{command}` failed: {reason}"))]
    DependencyInstall { command: String, reason: String },

    #[error("{failed} of {total} components could not be added")]
    #[diagnostic(
        code(sickui::add_incomplete),
        help("Components written before the failure were kept. Fix the errors above and rerun.")
    )]
    AddIncomplete { failed: usize, total: usize },

    #[error("Cannot read {path}")]
    #[diagnostic(code(sickui::read))]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}")]
    #[diagnostic(code(sickui::write))]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(sickui::prompt),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Prompt { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidComponentName { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<sickui_config::ConfigError> for CliError {
    fn from(err: sickui_config::ConfigError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<sickui_registry::Error> for CliError {
    fn from(err: sickui_registry::Error) -> Self {
        CoreError::from(err).into()
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PathNotFound { path } => CliError::PathNotFound {
                path: path.display().to_string(),
            },
            CoreError::ConfigMissing { .. } => CliError::ConfigMissing,
            CoreError::Config { message } => CliError::Config { message },
            CoreError::InvalidComponentName { name, reason } => CliError::InvalidComponentName {
                name,
                reason: reason.to_string(),
            },
            CoreError::RegistryUnavailable { message } => CliError::RegistryUnavailable { message },
            CoreError::RegistrySchemaMismatch { message } => {
                CliError::RegistrySchemaMismatch { message }
            }
            CoreError::FileRead { path, source } => CliError::FileRead {
                path: path.display().to_string(),
                source,
            },
            CoreError::CssMergeIo { path, source } | CoreError::FileWrite { path, source } => CliError::FileWrite {
                path: path.display().to_string(),
                source,
            },
            CoreError::DependencyInstall { command, reason } => {
                CliError::DependencyInstall { command, reason }
            }
            CoreError::Prompt { message } => CliError::Prompt { message },
        }
    }
}
