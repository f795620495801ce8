//! Stylesheet token merging.
//!
//! Ensures a project stylesheet declares every design token the components
//! reference, without disturbing what the user already wrote. The pipeline
//! runs pure passes over a [`Stylesheet`] tree:
//!
//! 1. v4 → v3 normalization when the project runs Tailwind v3
//! 2. relabeling of an inverted light color-scheme query
//! 3. dark-mode strategy detection
//! 4. gap analysis against the [`catalog`]
//! 5. patch synthesis for the target dialect
//! 6. the global base styles, when missing
//!
//! A stylesheet that already declares every token is returned byte for
//! byte, which makes merging idempotent.

pub mod catalog;
pub mod document;
pub mod normalize;
pub mod patch;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;

pub use catalog::{CATALOG, Token};
pub use document::Stylesheet;

// ── Options ──────────────────────────────────────────────────────────

/// Tailwind major-version family the stylesheet is written for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum TailwindDialect {
    V3,
    V4,
}

impl TailwindDialect {
    pub fn from_major(major: u32) -> Self {
        if major >= 4 { Self::V4 } else { Self::V3 }
    }
}

/// How dark-mode values are scoped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum DarkStrategy {
    /// A `.dark` class on an ancestor.
    Class,
    /// `@media (prefers-color-scheme: dark)`.
    Media,
}

impl DarkStrategy {
    /// `.dark` wins over a dark media query; neither means `class`.
    pub fn detect(sheet: &Stylesheet) -> Self {
        if sheet.has_dark_class() {
            Self::Class
        } else if sheet.has_dark_media() {
            Self::Media
        } else {
            Self::Class
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    pub dialect: TailwindDialect,
}

/// What a merge did.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Resulting stylesheet text.
    pub css: String,
    /// Tokens that were missing and have been added, in catalog order.
    pub added: Vec<&'static str>,
    pub strategy: DarkStrategy,
    /// v4 syntax was rewritten for a v3 project.
    pub normalized: bool,
}

impl MergeResult {
    pub fn changed(&self) -> bool {
        !self.added.is_empty()
    }
}

// ── Pipeline ─────────────────────────────────────────────────────────

/// Tokens not yet declared. In v4 mode `--color-<name>` counts as present.
pub fn missing_tokens(sheet: &Stylesheet, dialect: TailwindDialect) -> Vec<&'static Token> {
    let declared = sheet.declared_names();
    CATALOG
        .iter()
        .filter(|token| {
            !declared.contains(token.name)
                && !(dialect == TailwindDialect::V4
                    && declared.contains(&format!("color-{}", token.name)))
        })
        .collect()
}

/// Tokens without a dark value yet. `radius` is never one of them.
fn missing_dark_tokens(sheet: &Stylesheet, dialect: TailwindDialect) -> Vec<&'static Token> {
    let declared = sheet.dark_declared_names();
    CATALOG
        .iter()
        .filter(|token| {
            !token.is_radius()
                && !declared.contains(token.name)
                && !(dialect == TailwindDialect::V4
                    && declared.contains(&format!("color-{}", token.name)))
        })
        .collect()
}

/// Merge the token catalog into `src`.
pub fn merge_stylesheet(src: &str, options: MergeOptions) -> MergeResult {
    let mut sheet = Stylesheet::parse(src);

    let normalized = options.dialect == TailwindDialect::V3 && sheet.has_v4_markers();
    if normalized {
        sheet = normalize::to_v3(sheet);
    }
    sheet = normalize::fix_inverted_media(sheet);

    let strategy = DarkStrategy::detect(&sheet);
    let missing = missing_tokens(&sheet, options.dialect);
    debug!(
        dialect = %options.dialect,
        %strategy,
        missing = missing.len(),
        "analyzed stylesheet"
    );

    if missing.is_empty() {
        return MergeResult {
            css: src.to_string(),
            added: Vec::new(),
            strategy,
            normalized: false,
        };
    }

    if sheet.close_trailing() {
        debug!("closed a comment or block left open at the end of the stylesheet");
    }

    let dark = missing_dark_tokens(&sheet, options.dialect);
    let base_styles = !sheet.to_string().contains(patch::BASE_STYLES_MARKER);
    let added = missing.iter().map(|token| token.name).collect();

    let css = match options.dialect {
        TailwindDialect::V3 => patch::patch_v3(&sheet, &missing, &dark, strategy, base_styles),
        TailwindDialect::V4 => patch::patch_v4(sheet, &missing, &dark, strategy, base_styles),
    };

    MergeResult {
        css,
        added,
        strategy,
        normalized,
    }
}

/// Read, merge and rewrite a stylesheet in place. Untouched when nothing is
/// missing.
pub async fn merge_file(path: &Path, options: MergeOptions) -> Result<MergeResult, CoreError> {
    let io_error = |source| CoreError::CssMergeIo {
        path: path.to_path_buf(),
        source,
    };

    let src = tokio::fs::read_to_string(path).await.map_err(io_error)?;
    let result = merge_stylesheet(&src, options);
    if result.changed() {
        tokio::fs::write(path, &result.css).await.map_err(io_error)?;
        info!(
            path = %path.display(),
            added = result.added.len(),
            "stylesheet updated"
        );
    } else {
        debug!(path = %path.display(), "stylesheet already complete");
    }
    Ok(result)
}

/// Starting point for a project without a stylesheet.
pub fn fresh_stylesheet(dialect: TailwindDialect) -> &'static str {
    match dialect {
        TailwindDialect::V3 => normalize::V3_DIRECTIVES,
        TailwindDialect::V4 => "@import \"tailwindcss\";\n",
    }
}

/// The complete token set as it would be added to an empty stylesheet, for
/// users to paste by hand.
pub fn manual_snippet(dialect: TailwindDialect) -> String {
    merge_stylesheet("", MergeOptions { dialect }).css
}
