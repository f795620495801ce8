//! Clap derive structures for the `sickui` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this file may
//! only depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sickui -- add SickUI components to your project
#[derive(Debug, Parser)]
#[command(
    name = "sickui",
    version,
    about = "Add SickUI components to your React project",
    long_about = "Copies component source from the SickUI registry into your project,\n\
        rewrites imports to your aliases, installs npm dependencies and keeps\n\
        the design-token CSS variables in your stylesheet complete.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Registry base URL (overrides SICKUI_REGISTRY_URL and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Base URL serving raw component sources
    #[arg(long, global = true, value_name = "URL")]
    pub raw_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add components to your project
    Add(AddArgs),

    /// List the components available in the registry
    #[command(alias = "ls")]
    List,

    /// Check a local component for updates against the registry
    Diff(DiffArgs),

    /// Initialize your project and install dependencies
    Init(InitArgs),

    /// Check your project setup and diagnose common issues
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Components to add
    pub components: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Overwrite existing files
    #[arg(long, short = 'o')]
    pub overwrite: bool,

    /// Working directory
    #[arg(long, short = 'c', default_value = ".")]
    pub cwd: PathBuf,

    /// Add every component in the registry
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Directory to add the components to
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Do not install npm dependencies
    #[arg(long)]
    pub skip_install: bool,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Component name
    pub component: String,

    /// Working directory
    #[arg(long, short = 'c', default_value = ".")]
    pub cwd: PathBuf,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Use the default configuration without asking
    #[arg(long, short = 'd')]
    pub defaults: bool,

    /// Working directory
    #[arg(long, short = 'c', default_value = ".")]
    pub cwd: PathBuf,

    /// Do not install npm dependencies
    #[arg(long)]
    pub skip_install: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Working directory
    #[arg(long, short = 'c', default_value = ".")]
    pub cwd: PathBuf,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
