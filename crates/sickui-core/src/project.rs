// ── Project inspection ──
//
// Read-only facts about the consumer project, derived from the files in its
// root directory.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::css::TailwindDialect;

/// Major version assumed when `package.json` does not pin Tailwind.
pub const DEFAULT_TAILWIND_MAJOR: u32 = 4;

/// The subset of `package.json` the CLI looks at.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    /// `None` when the file is absent or unreadable.
    pub fn read(dir: &Path) -> Option<Self> {
        let text = std::fs::read_to_string(dir.join("package.json")).ok()?;
        match serde_json::from_str(&text) {
            Ok(package) => Some(package),
            Err(e) => {
                debug!(error = %e, "ignoring malformed package.json");
                None
            }
        }
    }

    /// Version range of `name` from either dependency table.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.dev_dependencies
            .get(name)
            .or_else(|| self.dependencies.get(name))
            .map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.version_of(name).is_some()
    }
}

/// Framework layout of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectInfo {
    pub is_typescript: bool,
    pub is_next_js: bool,
    pub is_src_dir: bool,
    pub is_app_dir: bool,
}

impl ProjectInfo {
    pub fn detect(cwd: &Path) -> Self {
        let is_src_dir = cwd.join("src").is_dir();
        let app_dir = if is_src_dir {
            cwd.join("src").join("app")
        } else {
            cwd.join("app")
        };
        let info = Self {
            is_typescript: cwd.join("tsconfig.json").is_file(),
            is_next_js: PackageJson::read(cwd).is_some_and(|p| p.dependencies.contains_key("next")),
            is_src_dir,
            is_app_dir: app_dir.is_dir(),
        };
        debug!(?info, "detected project layout");
        info
    }

    /// Where `init` puts the Tailwind config.
    pub fn tailwind_config_file(&self) -> &'static str {
        if self.is_next_js {
            "tailwind.config.ts"
        } else {
            "tailwind.config.js"
        }
    }

    /// Where `init` expects the global stylesheet.
    pub fn default_stylesheet(&self) -> &'static str {
        match (self.is_next_js, self.is_src_dir, self.is_app_dir) {
            (true, true, true) => "src/app/globals.css",
            (true, true, false) => "src/styles/globals.css",
            (true, false, true) => "app/globals.css",
            (true, false, false) => "styles/globals.css",
            (false, _, _) => "src/index.css",
        }
    }
}

/// Major version of a semver range such as `^3.4.1` or `~4.0.0-beta.1`.
pub fn parse_major_version(version: &str) -> Option<u32> {
    let cleaned: String = version
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.split('.').next()?.parse().ok()
}

/// Tailwind major version pinned in `package.json`, if any.
pub fn tailwind_major_version(cwd: &Path) -> Option<u32> {
    PackageJson::read(cwd)?
        .version_of("tailwindcss")
        .and_then(parse_major_version)
}

/// Pinned major version, or [`DEFAULT_TAILWIND_MAJOR`] when unknown or 0.
pub fn detect_tailwind_major(cwd: &Path) -> u32 {
    tailwind_major_version(cwd)
        .filter(|major| *major > 0)
        .unwrap_or(DEFAULT_TAILWIND_MAJOR)
}

pub fn detect_dialect(cwd: &Path) -> TailwindDialect {
    TailwindDialect::from_major(detect_tailwind_major(cwd))
}
