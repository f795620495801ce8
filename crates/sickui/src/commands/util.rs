//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, MultiSelect, Select, theme::ColorfulTheme};
use sickui_config::{ResolvedConfig, Settings, load_settings};
use sickui_core::{CoreError, HeadlessPrompter, Prompter};
use sickui_registry::{RegistryClient, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Prompts ──────────────────────────────────────────────────────────

/// Prompts on the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

fn prompt_error(err: dialoguer::Error) -> CoreError {
    CoreError::Prompt {
        message: err.to_string(),
    }
}

impl Prompter for TerminalPrompter {
    fn multi_select(&self, prompt: &str, choices: &[String]) -> Result<Vec<usize>, CoreError> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(choices)
            .interact()
            .map_err(prompt_error)
    }

    fn select(&self, prompt: &str, choices: &[String], default: usize) -> Result<usize, CoreError> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(choices)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CoreError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }
}

/// Terminal prompts when stdin is interactive, defaults otherwise.
pub fn prompter() -> Box<dyn Prompter> {
    if std::io::stdin().is_terminal() {
        Box::new(TerminalPrompter::default())
    } else {
        tracing::debug!("stdin is not a terminal, prompts use their defaults");
        Box::new(HeadlessPrompter)
    }
}

/// Ask before proceeding, auto-approving if `--yes` was passed.
pub fn proceed(prompter: &dyn Prompter, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    Ok(prompter.confirm(message, true)?)
}

// ── Project & registry ───────────────────────────────────────────────

/// Absolute working directory; it has to exist.
pub fn project_dir(cwd: &Path) -> Result<PathBuf, CliError> {
    let absolute = std::path::absolute(cwd).unwrap_or_else(|_| cwd.to_path_buf());
    if !absolute.is_dir() {
        return Err(CliError::PathNotFound {
            path: absolute.display().to_string(),
        });
    }
    Ok(absolute)
}

/// The project's `components.json`, resolved against its directory.
pub fn project_config(cwd: &Path) -> Result<ResolvedConfig, CliError> {
    Ok(ResolvedConfig::discover(cwd)?)
}

/// Settings from config.toml and the environment, with CLI flags on top.
pub fn settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = load_settings()?;
    if let Some(url) = &global.registry_url {
        settings.registry_url.clone_from(url);
    }
    if let Some(url) = &global.raw_url {
        settings.raw_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }
    Ok(settings)
}

pub fn registry_client(global: &GlobalOpts) -> Result<RegistryClient, CliError> {
    let settings = settings(global)?;
    let transport = TransportConfig::default().with_timeout(settings.timeout());
    let mut client = RegistryClient::new(settings.registry_url()?, &transport)?;
    if let Some(raw) = settings.raw_url()? {
        client = client.with_raw_source(raw);
    }
    tracing::debug!(registry = %client.base_url(), raw = ?client.raw_url().map(ToString::to_string), "registry client ready");
    Ok(client)
}

/// `path` relative to `base` for display, or as-is when outside it.
pub fn relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}
