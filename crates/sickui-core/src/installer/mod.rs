//! Writing resolved registry items into the project.
//!
//! Per item: pick the target directory, settle file collisions, write the
//! alias-rewritten sources and install npm dependencies. Items are processed
//! in order and independently: a failure ends that item's work and is
//! recorded, the remaining items still run. Nothing is rolled back.

pub mod package_manager;

use std::path::{Component, Path, PathBuf};

use sickui_config::ResolvedConfig;
use sickui_registry::{ItemType, RegistryItem};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::prompt::Prompter;
use crate::transform::transform;

pub use package_manager::{PackageInstaller, PackageManager, ProcessInstaller};

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Replace existing files without asking.
    pub overwrite: bool,
    /// Install every item here instead of its type's default directory.
    pub path: Option<PathBuf>,
    /// Write files only; leave npm packages to the user.
    pub skip_install: bool,
}

#[derive(Debug)]
pub enum ItemOutcome {
    Installed {
        files: Vec<PathBuf>,
        /// Packages installed through the package manager.
        packages: Vec<String>,
        /// Packages left out because of `skip_install`.
        deferred: Vec<String>,
    },
    /// Explicitly requested, already present, and `overwrite` not set.
    AlreadyExists,
    /// A dependency already present and the user chose to keep it.
    Kept,
    /// Examples only install with an explicit path.
    NoTarget,
    Failed(CoreError),
}

#[derive(Debug)]
pub struct ItemReport {
    pub name: String,
    pub outcome: ItemOutcome,
}

/// Per-item results, in processing order.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub items: Vec<ItemReport>,
}

impl InstallReport {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &CoreError)> {
        self.items.iter().filter_map(|report| match &report.outcome {
            ItemOutcome::Failed(err) => Some((report.name.as_str(), err)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn installed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|report| matches!(report.outcome, ItemOutcome::Installed { .. }))
            .count()
    }
}

pub struct Installer<'a, P> {
    config: &'a ResolvedConfig,
    options: &'a InstallOptions,
    prompter: &'a dyn Prompter,
    packages: &'a P,
    manager: PackageManager,
}

impl<'a, P: PackageInstaller> Installer<'a, P> {
    pub fn new(
        config: &'a ResolvedConfig,
        options: &'a InstallOptions,
        prompter: &'a dyn Prompter,
        packages: &'a P,
    ) -> Self {
        Self {
            config,
            options,
            prompter,
            packages,
            manager: PackageManager::detect(&config.root),
        }
    }

    /// `None` for items that have no default location.
    pub fn target_dir(&self, item: &RegistryItem) -> Option<PathBuf> {
        if let Some(path) = &self.options.path {
            return Some(path.clone());
        }
        match item.item_type {
            ItemType::Ui => Some(self.config.paths.components.join("ui")),
            ItemType::Component => Some(self.config.paths.components.clone()),
            ItemType::Example => None,
        }
    }

    /// Install `items`. `requested` holds the names the user asked for;
    /// everything else was pulled in as a dependency.
    pub async fn install_all(&self, items: &[RegistryItem], requested: &[String]) -> InstallReport {
        let mut report = InstallReport::default();
        for item in items {
            let explicit = requested.iter().any(|name| *name == item.name);
            let outcome = match self.install_item(item, explicit).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(item = %item.name, error = %err, "item failed");
                    ItemOutcome::Failed(err)
                }
            };
            report.items.push(ItemReport {
                name: item.name.clone(),
                outcome,
            });
        }
        report
    }

    async fn install_item(&self, item: &RegistryItem, explicit: bool) -> Result<ItemOutcome, CoreError> {
        if let Some(file) = item.files.iter().find(|file| !is_contained(&file.name)) {
            return Err(CoreError::RegistrySchemaMismatch {
                message: format!(
                    "{}: file name {:?} points outside the component directory",
                    item.name, file.name
                ),
            });
        }

        let Some(target) = self.target_dir(item) else {
            debug!(item = %item.name, "no target directory, skipping");
            return Ok(ItemOutcome::NoTarget);
        };

        tokio::fs::create_dir_all(&target)
            .await
            .map_err(|source| CoreError::FileWrite {
                path: target.clone(),
                source,
            })?;

        let exists = item.files.iter().any(|file| target.join(&file.name).exists());
        if exists && !self.options.overwrite {
            if explicit {
                return Ok(ItemOutcome::AlreadyExists);
            }
            let question = format!(
                "Component {} already exists. Would you like to overwrite?",
                item.name
            );
            if !self.prompter.confirm(&question, false)? {
                return Ok(ItemOutcome::Kept);
            }
        }

        let mut files = Vec::with_capacity(item.files.len());
        for file in &item.files {
            let path = target.join(&file.name);
            write_file(&path, &transform(&file.content, &self.config.config.aliases)).await?;
            files.push(path);
        }
        info!(item = %item.name, files = files.len(), target = %target.display(), "wrote component");

        let mut packages = Vec::new();
        let mut deferred = Vec::new();
        for (list, dev) in [(&item.dependencies, false), (&item.dev_dependencies, true)] {
            if list.is_empty() {
                continue;
            }
            if self.options.skip_install {
                deferred.extend(list.iter().cloned());
                continue;
            }
            self.packages
                .install(&self.config.root, self.manager, list, dev)
                .await?;
            packages.extend(list.iter().cloned());
        }

        Ok(ItemOutcome::Installed {
            files,
            packages,
            deferred,
        })
    }
}

/// Relative, and made of plain segments only.
fn is_contained(name: &str) -> bool {
    let path = Path::new(name);
    path.components().next().is_some()
        && path.components().all(|part| matches!(part, Component::Normal(_)))
}

async fn write_file(path: &Path, content: &str) -> Result<(), CoreError> {
    let io_error = |source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, content).await.map_err(io_error)?;
    debug!(path = %path.display(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use super::*;
    use crate::prompt::HeadlessPrompter;
    use crate::prompt::scripted::ScriptedPrompter;
    use pretty_assertions::assert_eq;
    use sickui_config::ProjectConfig;
    use sickui_registry::RegistryFile;

    /// Records install calls; fails for any package named `broken`.
    #[derive(Default)]
    struct RecordingInstaller {
        calls: Mutex<Vec<String>>,
    }

    impl PackageInstaller for RecordingInstaller {
        async fn install(
            &self,
            _cwd: &Path,
            manager: PackageManager,
            packages: &[String],
            dev: bool,
        ) -> Result<(), CoreError> {
            let line = manager.command_line(packages, dev);
            self.calls.lock().unwrap().push(line.clone());
            if packages.iter().any(|p| p == "broken") {
                return Err(CoreError::DependencyInstall {
                    command: line,
                    reason: "exit status: 1".into(),
                });
            }
            Ok(())
        }
    }

    fn project() -> (tempfile::TempDir, ResolvedConfig) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.aliases.utils = "@/utils".into();
        let resolved = ResolvedConfig::new(dir.path(), config);
        (dir, resolved)
    }

    fn item(name: &str, item_type: ItemType) -> RegistryItem {
        RegistryItem {
            name: name.into(),
            item_type,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            files: vec![RegistryFile {
                name: format!("{name}.tsx"),
                content: format!("import {{ cn }} from \"@/lib/utils\"\nexport const {name} = 1\n"),
            }],
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn writes_transformed_files_by_type() {
        let (dir, config) = project();
        let options = InstallOptions::default();
        let packages = RecordingInstaller::default();
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);

        let items = vec![item("button", ItemType::Ui), item("hero", ItemType::Component)];
        let report = installer.install_all(&items, &names(&["button", "hero"])).await;

        assert_eq!(report.installed_count(), 2);
        let button = std::fs::read_to_string(dir.path().join("components/ui/button.tsx")).unwrap();
        assert!(button.starts_with("import { cn } from \"@/utils\""));
        assert!(dir.path().join("components/hero.tsx").is_file());
    }

    #[tokio::test]
    async fn file_names_cannot_leave_the_target_directory() {
        let (dir, config) = project();
        let options = InstallOptions::default();
        let packages = RecordingInstaller::default();
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);

        let outside = dir.path().join("outside.tsx");
        let mut escaping = item("escape", ItemType::Ui);
        escaping.files[0].name = "../../outside.tsx".into();
        let mut absolute = item("absolute", ItemType::Ui);
        absolute.files[0].name = outside.display().to_string();
        let items = vec![escaping, absolute, item("button", ItemType::Ui)];

        let report = installer
            .install_all(&items, &names(&["escape", "absolute", "button"]))
            .await;

        assert!(matches!(
            report.items[0].outcome,
            ItemOutcome::Failed(CoreError::RegistrySchemaMismatch { .. })
        ));
        assert!(matches!(
            report.items[1].outcome,
            ItemOutcome::Failed(CoreError::RegistrySchemaMismatch { .. })
        ));
        assert!(!outside.exists());
        assert_eq!(report.installed_count(), 1);
    }

    #[test]
    fn contained_file_names() {
        assert!(is_contained("button.tsx"));
        assert!(is_contained("hooks/use-toast.ts"));
        assert!(!is_contained(""));
        assert!(!is_contained("../button.tsx"));
        assert!(!is_contained("ui/../../button.tsx"));
        assert!(!is_contained("/etc/passwd"));
    }

    #[tokio::test]
    async fn examples_need_an_explicit_path() {
        let (dir, config) = project();
        let packages = RecordingInstaller::default();
        let items = vec![item("demo", ItemType::Example)];

        let options = InstallOptions::default();
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);
        let report = installer.install_all(&items, &names(&["demo"])).await;
        assert!(matches!(report.items[0].outcome, ItemOutcome::NoTarget));

        let options = InstallOptions {
            path: Some(dir.path().join("docs/examples")),
            ..InstallOptions::default()
        };
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);
        let report = installer.install_all(&items, &names(&["demo"])).await;
        assert_eq!(report.installed_count(), 1);
        assert!(dir.path().join("docs/examples/demo.tsx").is_file());
    }

    #[tokio::test]
    async fn collisions_follow_overwrite_and_prompt() {
        let (dir, config) = project();
        let ui = dir.path().join("components/ui");
        std::fs::create_dir_all(&ui).unwrap();
        std::fs::write(ui.join("button.tsx"), "local").unwrap();
        std::fs::write(ui.join("slot.tsx"), "local").unwrap();

        let packages = RecordingInstaller::default();
        let items = vec![item("button", ItemType::Ui), item("slot", ItemType::Ui)];
        let options = InstallOptions::default();

        // Explicit item is skipped without asking; the dependency is asked
        // about and kept.
        let prompter = ScriptedPrompter::confirming(&[false]);
        let installer = Installer::new(&config, &options, &prompter, &packages);
        let report = installer.install_all(&items, &names(&["button"])).await;
        assert!(matches!(report.items[0].outcome, ItemOutcome::AlreadyExists));
        assert!(matches!(report.items[1].outcome, ItemOutcome::Kept));
        assert_eq!(prompter.asked.lock().unwrap().len(), 1);
        assert_eq!(std::fs::read_to_string(ui.join("slot.tsx")).unwrap(), "local");

        // Answering yes replaces the dependency.
        let prompter = ScriptedPrompter::confirming(&[true]);
        let installer = Installer::new(&config, &options, &prompter, &packages);
        let report = installer.install_all(&items, &names(&["button"])).await;
        assert!(matches!(report.items[1].outcome, ItemOutcome::Installed { .. }));
        assert_ne!(std::fs::read_to_string(ui.join("slot.tsx")).unwrap(), "local");

        // --overwrite never asks.
        let options = InstallOptions {
            overwrite: true,
            ..InstallOptions::default()
        };
        let prompter = ScriptedPrompter::default();
        let installer = Installer::new(&config, &options, &prompter, &packages);
        let report = installer.install_all(&items, &names(&["button"])).await;
        assert_eq!(report.installed_count(), 2);
        assert!(prompter.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dependencies_then_dev_dependencies() {
        let (dir, config) = project();
        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        let packages = RecordingInstaller::default();
        let options = InstallOptions::default();
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);

        let mut dialog = item("dialog", ItemType::Ui);
        dialog.dependencies = names(&["@radix-ui/react-dialog"]);
        dialog.dev_dependencies = names(&["@types/react"]);
        let report = installer.install_all(&[dialog], &names(&["dialog"])).await;

        assert_eq!(report.installed_count(), 1);
        assert_eq!(
            *packages.calls.lock().unwrap(),
            names(&["pnpm add @radix-ui/react-dialog", "pnpm add --dev @types/react"])
        );
    }

    #[tokio::test]
    async fn skip_install_defers_packages() {
        let (_dir, config) = project();
        let packages = RecordingInstaller::default();
        let options = InstallOptions {
            skip_install: true,
            ..InstallOptions::default()
        };
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);

        let mut dialog = item("dialog", ItemType::Ui);
        dialog.dependencies = names(&["clsx"]);
        let report = installer.install_all(&[dialog], &names(&["dialog"])).await;

        match &report.items[0].outcome {
            ItemOutcome::Installed { packages: done, deferred, .. } => {
                assert!(done.is_empty());
                assert_eq!(deferred, &names(&["clsx"]));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(packages.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn install_failure_is_local_to_the_item() {
        let (dir, config) = project();
        let packages = RecordingInstaller::default();
        let options = InstallOptions::default();
        let installer = Installer::new(&config, &options, &HeadlessPrompter, &packages);

        let mut bad = item("bad", ItemType::Ui);
        bad.dependencies = names(&["broken"]);
        let items = vec![bad, item("good", ItemType::Ui)];
        let report = installer.install_all(&items, &names(&["bad", "good"])).await;

        assert!(report.has_failures());
        assert_eq!(report.failures().map(|(name, _)| name).collect::<Vec<_>>(), vec!["bad"]);
        assert_eq!(report.installed_count(), 1);
        // Files written before the failure stay in place.
        assert!(dir.path().join("components/ui/bad.tsx").is_file());
        assert!(dir.path().join("components/ui/good.tsx").is_file());
    }
}
