// ── Package manager ──
//
// Detection from lockfiles and the install subprocess.

use std::future::Future;
use std::path::Path;

use tracing::{debug, info};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// First lockfile found wins, in the order pnpm, yarn, npm. npm when
    /// there is none.
    pub fn detect(cwd: &Path) -> Self {
        const LOCKFILES: [(&str, PackageManager); 3] = [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("package-lock.json", PackageManager::Npm),
        ];
        let manager = LOCKFILES
            .iter()
            .find(|(file, _)| cwd.join(file).is_file())
            .map_or(Self::Npm, |(_, manager)| *manager);
        debug!(%manager, "detected package manager");
        manager
    }

    pub fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }

    /// Arguments after the program name.
    pub fn install_args(self, packages: &[String], dev: bool) -> Vec<String> {
        let mut args = vec![match self {
            Self::Npm => "install".to_string(),
            Self::Pnpm | Self::Yarn => "add".to_string(),
        }];
        if dev {
            args.push(match self {
                Self::Npm => "--save-dev".to_string(),
                Self::Pnpm | Self::Yarn => "--dev".to_string(),
            });
        }
        args.extend(packages.iter().cloned());
        args
    }

    /// The full command line, for messages.
    pub fn command_line(self, packages: &[String], dev: bool) -> String {
        let mut line = self.program().to_string();
        for arg in self.install_args(packages, dev) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

/// Runs package installs. Swapped out in tests.
pub trait PackageInstaller: Send + Sync {
    fn install(
        &self,
        cwd: &Path,
        manager: PackageManager,
        packages: &[String],
        dev: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Spawns the package manager as a child process in the project root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInstaller;

impl PackageInstaller for ProcessInstaller {
    async fn install(
        &self,
        cwd: &Path,
        manager: PackageManager,
        packages: &[String],
        dev: bool,
    ) -> Result<(), CoreError> {
        let command = manager.command_line(packages, dev);
        info!(%command, cwd = %cwd.display(), "installing packages");

        let output = tokio::process::Command::new(manager.program())
            .args(manager.install_args(packages, dev))
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| CoreError::DependencyInstall {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map_or_else(|| output.status.to_string(), |line| line.trim().to_string());
        Err(CoreError::DependencyInstall { command, reason })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn pkgs(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn lockfile_precedence() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Npm);

        std::fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Yarn);

        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn install_arguments() {
        let deps = pkgs(&["clsx", "tailwind-merge"]);
        assert_eq!(
            PackageManager::Npm.install_args(&deps, false),
            pkgs(&["install", "clsx", "tailwind-merge"])
        );
        assert_eq!(
            PackageManager::Npm.command_line(&pkgs(&["@types/react"]), true),
            "npm install --save-dev @types/react"
        );
        assert_eq!(
            PackageManager::Pnpm.command_line(&pkgs(&["@types/react"]), true),
            "pnpm add --dev @types/react"
        );
        assert_eq!(PackageManager::Yarn.command_line(&deps, false), "yarn add clsx tailwind-merge");
    }

    #[tokio::test]
    async fn missing_program_is_an_install_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Run in a directory that does not exist so spawning fails regardless
        // of which package managers are installed on the host.
        let result = ProcessInstaller
            .install(&dir.path().join("gone"), PackageManager::Npm, &pkgs(&["clsx"]), false)
            .await;
        assert!(matches!(result, Err(CoreError::DependencyInstall { .. })));
    }
}
