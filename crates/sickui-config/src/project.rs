// ── Project configuration (components.json) ──
//
// Created once by `init`, read by every other command. The CLI never
// rewrites it after creation; users may hand-edit it.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Json},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ConfigError;

/// File name searched for in the project root and its ancestors.
pub const COMPONENTS_JSON: &str = "components.json";

pub const DEFAULT_STYLE: &str = "default";
pub const DEFAULT_BASE_COLOR: &str = "slate";
pub const DEFAULT_COMPONENTS: &str = "@/components";
pub const DEFAULT_UTILS: &str = "@/lib/utils";
pub const DEFAULT_TAILWIND_CONFIG: &str = "tailwind.config.js";
pub const DEFAULT_TAILWIND_CSS: &str = "app/globals.css";

// ── Structs ─────────────────────────────────────────────────────────

/// Contents of `components.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default = "default_style")]
    pub style: String,

    pub tailwind: TailwindConfig,

    /// React Server Components project (Next.js app router).
    #[serde(default)]
    pub rsc: bool,

    #[serde(default = "default_true")]
    pub tsx: bool,

    pub aliases: Aliases,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Path of the Tailwind config file, relative to the project root.
    #[serde(default = "default_tailwind_config")]
    pub config: String,

    /// Path of the global stylesheet, relative to the project root.
    #[serde(default = "default_tailwind_css")]
    pub css: String,

    #[serde(default = "default_base_color")]
    pub base_color: String,

    #[serde(default = "default_true")]
    pub css_variables: bool,
}

/// Import aliases as written in the consumer's source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    #[serde(default = "default_utils")]
    pub utils: String,

    #[serde(default = "default_components")]
    pub components: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            tailwind: TailwindConfig {
                config: default_tailwind_config(),
                css: default_tailwind_css(),
                base_color: default_base_color(),
                css_variables: true,
            },
            rsc: false,
            tsx: true,
            aliases: Aliases {
                utils: default_utils(),
                components: default_components(),
            },
        }
    }
}

fn default_style() -> String {
    DEFAULT_STYLE.into()
}
fn default_base_color() -> String {
    DEFAULT_BASE_COLOR.into()
}
fn default_components() -> String {
    DEFAULT_COMPONENTS.into()
}
fn default_utils() -> String {
    DEFAULT_UTILS.into()
}
fn default_tailwind_config() -> String {
    DEFAULT_TAILWIND_CONFIG.into()
}
fn default_tailwind_css() -> String {
    DEFAULT_TAILWIND_CSS.into()
}
fn default_true() -> bool {
    true
}

// ── Discovery / loading / saving ────────────────────────────────────

/// Search `start` and its ancestors for `components.json`.
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(COMPONENTS_JSON))
        .find(|candidate| candidate.is_file())
}

/// Load and validate a `components.json` file.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    debug!(path = %path.display(), "loading project config");
    let config: ProjectConfig = Figment::new().merge(Json::file(path)).extract()?;
    Ok(config)
}

/// Write `components.json` into `dir`, pretty-printed. Returns the file path.
pub fn save_project_config(dir: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
    let path = dir.join(COMPONENTS_JSON);
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    std::fs::write(&path, json)?;
    Ok(path)
}

// ── Path resolution ─────────────────────────────────────────────────

/// Absolute filesystem locations derived from a `ProjectConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub tailwind_config: PathBuf,
    pub tailwind_css: PathBuf,
    pub utils: PathBuf,
    pub components: PathBuf,
}

/// A loaded project config together with its root and resolved paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ProjectConfig,
    /// Directory containing `components.json`.
    pub root: PathBuf,
    pub paths: ResolvedPaths,
}

impl ResolvedConfig {
    /// Resolve every configured path against `root`.
    pub fn new(root: &Path, config: ProjectConfig) -> Self {
        let paths = ResolvedPaths {
            tailwind_config: root.join(&config.tailwind.config),
            tailwind_css: root.join(&config.tailwind.css),
            utils: resolve_import(&config.aliases.utils, root),
            components: resolve_import(&config.aliases.components, root),
        };
        Self {
            config,
            root: root.to_path_buf(),
            paths,
        }
    }

    /// Find `components.json` from `cwd` upward, load it and resolve paths.
    pub fn discover(cwd: &Path) -> Result<Self, ConfigError> {
        let path = find_project_config(cwd).ok_or_else(|| ConfigError::NotFound {
            searched: cwd.display().to_string(),
        })?;
        let config = load_project_config(&path)?;
        let root = path.parent().unwrap_or(cwd);
        Ok(Self::new(root, config))
    }
}

/// Map an import alias to a directory under `root`.
///
/// `@/` points at `src/` when the project has one, otherwise at the root.
/// Anything else is taken as a path relative to the root.
pub fn resolve_import(alias: &str, root: &Path) -> PathBuf {
    match alias.strip_prefix("@/") {
        Some(rest) if root.join("src").is_dir() => root.join("src").join(rest),
        Some(rest) => root.join(rest),
        None => root.join(alias),
    }
}
