//! Core operations of the sickui component CLI.
//!
//! Everything between the registry and the consumer project lives here:
//! dependency resolution over the registry index, import-alias rewriting,
//! the stylesheet token merge, file installation and the read-only `check`
//! and `diff` inspections. The CLI crate only parses arguments, asks
//! questions through a [`Prompter`] and renders results.

pub mod css;
pub mod diagnose;
pub mod diff;
pub mod error;
pub mod init;
pub mod installer;
pub mod project;
pub mod prompt;
pub mod resolver;
pub mod templates;
pub mod transform;

pub use error::CoreError;
pub use installer::{
    InstallOptions, InstallReport, Installer, ItemOutcome, PackageInstaller, PackageManager,
    ProcessInstaller,
};
pub use project::ProjectInfo;
pub use prompt::{HeadlessPrompter, Prompter};
pub use resolver::resolve;
pub use transform::transform;
