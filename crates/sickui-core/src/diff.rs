// ── Local copy vs registry ──
//
// `diff` compares the installed `{components}/ui/{name}.tsx` with what `add`
// would write today: the item's first file after alias rewriting.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use sickui_config::ResolvedConfig;
use sickui_registry::RegistryItem;
use tracing::debug;

use crate::error::CoreError;
use crate::transform::transform;

static COMPONENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*$").expect("COMPONENT_NAME: invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffStatus {
    UpToDate,
    /// `lines` counts positions whose trimmed text differs, plus the line
    /// count difference.
    Changed { lines: usize },
    /// No local copy at `path`.
    Missing { path: PathBuf },
}

/// Names are lowercase letters, digits and hyphens, starting with a letter.
pub fn validate_component_name(name: &str) -> Result<(), CoreError> {
    let reason = if name.is_empty() {
        "a name is required"
    } else if !COMPONENT_NAME.is_match(name) {
        "use lowercase letters, numbers and hyphens, starting with a letter"
    } else {
        return Ok(());
    };
    Err(CoreError::InvalidComponentName {
        name: name.to_string(),
        reason,
    })
}

/// Where `add` puts a `ui` item with the given name.
pub fn local_path(config: &ResolvedConfig, name: &str) -> PathBuf {
    config.paths.components.join("ui").join(format!("{name}.tsx"))
}

/// Number of differing lines, comparing line by line with surrounding
/// whitespace ignored.
pub fn count_changed_lines(local: &str, upstream: &str) -> usize {
    let local: Vec<&str> = local.split('\n').collect();
    let upstream: Vec<&str> = upstream.split('\n').collect();
    let differing = local
        .iter()
        .zip(&upstream)
        .filter(|(a, b)| a.trim() != b.trim())
        .count();
    differing + local.len().abs_diff(upstream.len())
}

pub fn compare(config: &ResolvedConfig, item: &RegistryItem) -> Result<DiffStatus, CoreError> {
    let path = local_path(config, &item.name);
    if !path.is_file() {
        return Ok(DiffStatus::Missing { path });
    }
    let local = read(&path)?;
    let upstream = item
        .files
        .first()
        .map(|file| transform(&file.content, &config.config.aliases))
        .unwrap_or_default();

    let lines = count_changed_lines(&local, &upstream);
    debug!(item = %item.name, lines, "compared local copy");
    Ok(if lines == 0 {
        DiffStatus::UpToDate
    } else {
        DiffStatus::Changed { lines }
    })
}

fn read(path: &Path) -> Result<String, CoreError> {
    std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
