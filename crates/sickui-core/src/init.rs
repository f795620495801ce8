//! Project scaffolding for `init`.
//!
//! Writes `components.json`, seeds or merges the global stylesheet, adds the
//! Tailwind config and the `cn` helper when they are missing, creates the
//! components directory and installs the shared runtime packages.

use std::path::{Path, PathBuf};

use sickui_config::{ProjectConfig, ResolvedConfig, TailwindConfig, save_project_config};
use tracing::{debug, info, warn};

use crate::css::{self, MergeOptions, MergeResult, TailwindDialect};
use crate::error::CoreError;
use crate::installer::{PackageInstaller, PackageManager};
use crate::project::{ProjectInfo, detect_dialect};
use crate::prompt::Prompter;
use crate::templates::{self, BASE_COLORS, PROJECT_DEPENDENCIES, STYLES};

/// Answers to the `init` questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitChoices {
    pub style: String,
    pub base_color: String,
    pub css_variables: bool,
}

impl Default for InitChoices {
    fn default() -> Self {
        Self {
            style: STYLES[0].into(),
            base_color: BASE_COLORS[0].into(),
            css_variables: true,
        }
    }
}

impl InitChoices {
    pub fn prompt(prompter: &dyn Prompter) -> Result<Self, CoreError> {
        let styles: Vec<String> = STYLES.iter().map(ToString::to_string).collect();
        let colors: Vec<String> = BASE_COLORS.iter().map(ToString::to_string).collect();

        let style = prompter.select("Which style would you like to use?", &styles, 0)?;
        let color = prompter.select("Which color would you like to use as base color?", &colors, 0)?;
        let css_variables = prompter.confirm("Would you like to use CSS variables for colors?", true)?;

        Ok(Self {
            style: styles.get(style).cloned().unwrap_or_else(|| STYLES[0].into()),
            base_color: colors.get(color).cloned().unwrap_or_else(|| BASE_COLORS[0].into()),
            css_variables,
        })
    }

    /// The `components.json` contents for a project with this layout.
    pub fn into_config(self, info: &ProjectInfo) -> ProjectConfig {
        let defaults = ProjectConfig::default();
        ProjectConfig {
            style: self.style,
            tailwind: TailwindConfig {
                config: info.tailwind_config_file().into(),
                css: info.default_stylesheet().into(),
                base_color: self.base_color,
                css_variables: self.css_variables,
            },
            rsc: info.is_next_js,
            tsx: info.is_typescript,
            aliases: defaults.aliases,
        }
    }
}

/// Where the stylesheet has to be imported for the styles to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportHint {
    pub file: &'static str,
    pub statement: String,
}

impl ImportHint {
    pub fn for_project(info: &ProjectInfo, css: &str) -> Self {
        let file_name = Path::new(css)
            .file_name()
            .map_or_else(|| css.to_string(), |name| name.to_string_lossy().into_owned());
        match (info.is_next_js, info.is_app_dir) {
            (true, true) => Self {
                file: "app/layout.tsx or src/app/layout.tsx",
                statement: format!("import \"./{file_name}\""),
            },
            (true, false) => Self {
                file: "pages/_app.tsx",
                statement: format!("import \"../{css}\""),
            },
            (false, _) => Self {
                file: "src/main.tsx or src/index.tsx",
                statement: format!("import \"./{file_name}\""),
            },
        }
    }
}

#[derive(Debug)]
pub enum StylesheetOutcome {
    Merged { created: bool, result: MergeResult },
    /// The file could not be updated; the variables have to be added by hand.
    Manual { error: CoreError, snippet: String },
}

#[derive(Debug)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub tailwind_config: PathBuf,
    pub tailwind_config_created: bool,
    pub stylesheet: PathBuf,
    pub stylesheet_outcome: StylesheetOutcome,
    pub dialect: TailwindDialect,
    pub utils: PathBuf,
    pub utils_created: bool,
    pub components_ui: PathBuf,
    pub import_hint: ImportHint,
    /// Installed packages; empty with `skip_install`.
    pub installed: Vec<String>,
}

/// Scaffold the project in `cwd` for `config`.
pub async fn run_init<P: PackageInstaller>(
    cwd: &Path,
    config: ProjectConfig,
    info: &ProjectInfo,
    skip_install: bool,
    packages: &P,
) -> Result<InitReport, CoreError> {
    if !cwd.is_dir() {
        return Err(CoreError::PathNotFound {
            path: cwd.to_path_buf(),
        });
    }

    let config_path = save_project_config(cwd, &config)?;
    info!(path = %config_path.display(), "wrote project config");

    // Seeding may create `src/`, which changes where `@/` aliases resolve.
    let dialect = detect_dialect(cwd);
    let stylesheet_outcome = seed_stylesheet(&cwd.join(&config.tailwind.css), dialect).await;

    let resolved = ResolvedConfig::new(cwd, config);
    let paths = &resolved.paths;

    let typescript_config = resolved.config.tailwind.config.ends_with(".ts");
    let tailwind_config_created =
        write_if_absent(&paths.tailwind_config, &templates::tailwind_config(typescript_config)).await?;

    let utils = paths.utils.with_extension(if resolved.config.tsx { "ts" } else { "js" });
    let utils_created = write_if_absent(&utils, templates::utils_module(resolved.config.tsx)).await?;

    let components_ui = paths.components.join("ui");
    tokio::fs::create_dir_all(&components_ui)
        .await
        .map_err(|source| CoreError::FileWrite {
            path: components_ui.clone(),
            source,
        })?;

    let mut installed = Vec::new();
    if skip_install {
        debug!("skipping project dependencies");
    } else {
        let dependencies: Vec<String> = PROJECT_DEPENDENCIES.iter().map(ToString::to_string).collect();
        packages
            .install(cwd, PackageManager::detect(cwd), &dependencies, false)
            .await?;
        installed = dependencies;
    }

    Ok(InitReport {
        config_path,
        tailwind_config: paths.tailwind_config.clone(),
        tailwind_config_created,
        stylesheet: paths.tailwind_css.clone(),
        stylesheet_outcome,
        dialect,
        utils,
        utils_created,
        components_ui,
        import_hint: ImportHint::for_project(info, &resolved.config.tailwind.css),
        installed,
    })
}

/// Create the stylesheet from the dialect's template when absent, then merge
/// the design tokens into it.
async fn seed_stylesheet(path: &Path, dialect: TailwindDialect) -> StylesheetOutcome {
    let options = MergeOptions { dialect };
    let created = match write_if_absent(path, css::fresh_stylesheet(dialect)).await {
        Ok(created) => created,
        Err(CoreError::FileWrite { path, source }) => {
            return manual(CoreError::CssMergeIo { path, source }, dialect);
        }
        Err(error) => return manual(error, dialect),
    };
    match css::merge_file(path, options).await {
        Ok(result) => StylesheetOutcome::Merged { created, result },
        Err(error) => manual(error, dialect),
    }
}

fn manual(error: CoreError, dialect: TailwindDialect) -> StylesheetOutcome {
    warn!(%error, "stylesheet not updated");
    StylesheetOutcome::Manual {
        error,
        snippet: css::manual_snippet(dialect),
    }
}

/// Returns whether the file was written.
async fn write_if_absent(path: &Path, content: &str) -> Result<bool, CoreError> {
    if path.exists() {
        debug!(path = %path.display(), "keeping existing file");
        return Ok(false);
    }
    let io_error = |source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, content).await.map_err(io_error)?;
    info!(path = %path.display(), "created file");
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use super::*;
    use crate::prompt::HeadlessPrompter;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingInstaller {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl PackageInstaller for RecordingInstaller {
        async fn install(
            &self,
            _cwd: &Path,
            _manager: PackageManager,
            packages: &[String],
            _dev: bool,
        ) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(packages.to_vec());
            Ok(())
        }
    }

    fn next_app(dir: &Path, tailwind: &str) -> ProjectInfo {
        std::fs::write(
            dir.join("package.json"),
            format!(r#"{{ "dependencies": {{ "next": "15.0.0" }}, "devDependencies": {{ "tailwindcss": "{tailwind}" }} }}"#),
        )
        .unwrap();
        std::fs::write(dir.join("tsconfig.json"), "{}").unwrap();
        std::fs::create_dir_all(dir.join("src/app")).unwrap();
        ProjectInfo::detect(dir)
    }

    #[test]
    fn headless_choices_are_the_defaults() {
        assert_eq!(InitChoices::prompt(&HeadlessPrompter).unwrap(), InitChoices::default());
    }

    #[test]
    fn config_follows_project_layout() {
        let info = ProjectInfo {
            is_typescript: true,
            is_next_js: true,
            is_src_dir: false,
            is_app_dir: true,
        };
        let config = InitChoices::default().into_config(&info);
        assert_eq!(config.tailwind.config, "tailwind.config.ts");
        assert_eq!(config.tailwind.css, "app/globals.css");
        assert_eq!(config.tailwind.base_color, "slate");
        assert!(config.rsc);
        assert!(config.tsx);
        assert_eq!(config.aliases.utils, "@/lib/utils");
    }

    #[test]
    fn import_hints() {
        let mut info = ProjectInfo {
            is_next_js: true,
            is_app_dir: true,
            ..ProjectInfo::default()
        };
        assert_eq!(
            ImportHint::for_project(&info, "src/app/globals.css").statement,
            "import \"./globals.css\""
        );
        info.is_app_dir = false;
        assert_eq!(
            ImportHint::for_project(&info, "styles/globals.css").statement,
            "import \"../styles/globals.css\""
        );
        let vite = ImportHint::for_project(&ProjectInfo::default(), "src/index.css");
        assert_eq!(vite.file, "src/main.tsx or src/index.tsx");
    }

    #[tokio::test]
    async fn scaffolds_a_next_project() {
        let dir = tempfile::tempdir().unwrap();
        let info = next_app(dir.path(), "^4.0.0");
        let config = InitChoices::default().into_config(&info);
        let packages = RecordingInstaller::default();

        let report = run_init(dir.path(), config, &info, false, &packages).await.unwrap();

        assert!(dir.path().join("components.json").is_file());
        assert!(report.tailwind_config_created);
        assert_eq!(report.stylesheet, dir.path().join("src/app/globals.css"));
        assert_eq!(report.dialect, TailwindDialect::V4);
        match &report.stylesheet_outcome {
            StylesheetOutcome::Merged { created, result } => {
                assert!(created);
                assert_eq!(result.added.len(), css::CATALOG.len());
            }
            StylesheetOutcome::Manual { error, .. } => panic!("unexpected manual fallback: {error}"),
        }
        let stylesheet = std::fs::read_to_string(&report.stylesheet).unwrap();
        assert!(stylesheet.starts_with("@import \"tailwindcss\";"));
        assert!(stylesheet.contains("--color-background:"));

        assert_eq!(report.utils, dir.path().join("src/lib/utils.ts"));
        assert_eq!(std::fs::read_to_string(&report.utils).unwrap(), templates::UTILS_TS);
        assert!(dir.path().join("src/components/ui").is_dir());
        assert_eq!(
            *packages.calls.lock().unwrap(),
            vec![PROJECT_DEPENDENCIES.iter().map(ToString::to_string).collect::<Vec<_>>()]
        );
    }

    #[tokio::test]
    async fn keeps_existing_files_and_merges_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let info = next_app(dir.path(), "^3.4.1");
        std::fs::write(dir.path().join("tailwind.config.ts"), "// mine\n").unwrap();
        std::fs::write(
            dir.path().join("src/app/globals.css"),
            "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n\nbody { margin: 0; }\n",
        )
        .unwrap();
        let config = InitChoices::default().into_config(&info);
        let packages = RecordingInstaller::default();

        let report = run_init(dir.path(), config, &info, true, &packages).await.unwrap();

        assert!(!report.tailwind_config_created);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("tailwind.config.ts")).unwrap(),
            "// mine\n"
        );
        assert!(matches!(
            report.stylesheet_outcome,
            StylesheetOutcome::Merged { created: false, .. }
        ));
        let stylesheet = std::fs::read_to_string(&report.stylesheet).unwrap();
        assert!(stylesheet.contains("body { margin: 0; }"));
        assert!(stylesheet.contains("@layer base"));
        assert!(report.installed.is_empty());
        assert!(packages.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_stylesheet_falls_back_to_manual_snippet() {
        let dir = tempfile::tempdir().unwrap();
        let info = ProjectInfo::default();
        let config = InitChoices::default().into_config(&info);
        // A directory in place of the stylesheet makes reads fail.
        std::fs::create_dir_all(dir.path().join("src/index.css")).unwrap();
        let packages = RecordingInstaller::default();

        let report = run_init(dir.path(), config, &info, true, &packages).await.unwrap();

        match report.stylesheet_outcome {
            StylesheetOutcome::Manual { error, snippet } => {
                assert!(matches!(error, CoreError::CssMergeIo { .. }));
                assert!(snippet.contains("--background"));
            }
            StylesheetOutcome::Merged { .. } => panic!("merge should have failed"),
        }
    }

    #[tokio::test]
    async fn aliases_follow_a_freshly_created_src_dir() {
        let dir = tempfile::tempdir().unwrap();
        let info = ProjectInfo::default();
        let config = InitChoices::default().into_config(&info);

        let report = run_init(dir.path(), config, &info, true, &RecordingInstaller::default())
            .await
            .unwrap();

        assert!(dir.path().join("src/index.css").is_file());
        assert_eq!(report.utils, dir.path().join("src/lib/utils.js"));
        assert_eq!(report.components_ui, dir.path().join("src/components/ui"));
    }

    #[tokio::test]
    async fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        let result = run_init(
            &gone,
            ProjectConfig::default(),
            &ProjectInfo::default(),
            true,
            &RecordingInstaller::default(),
        )
        .await;
        assert!(matches!(result, Err(CoreError::PathNotFound { .. })));
    }
}
