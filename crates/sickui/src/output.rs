//! Output formatting: table, JSON, YAML, plain, and status lines.
//!
//! Command results go to stdout in the format selected by `--output`.
//! Progress and status messages go to stderr and disappear with `--quiet`.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Status lines ─────────────────────────────────────────────────────

/// Human-facing messages on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Status {
    quiet: bool,
    color: bool,
}

impl Status {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            quiet: global.quiet,
            color: should_color(&global.color),
        }
    }

    pub fn info(&self, message: &str) {
        self.emit(message);
    }

    pub fn success(&self, message: &str) {
        if self.color {
            self.emit(&format!("{} {message}", "✔".green()));
        } else {
            self.emit(&format!("✔ {message}"));
        }
    }

    pub fn warn(&self, message: &str) {
        if self.color {
            self.emit(&format!("{} {message}", "!".yellow().bold()));
        } else {
            self.emit(&format!("! {message}"));
        }
    }

    /// Shown even with `--quiet`.
    pub fn error(&self, message: &str) {
        let line = if self.color {
            format!("{} {message}", "✖".red().bold())
        } else {
            format!("✖ {message}")
        };
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    /// Indented follow-up to the previous line.
    pub fn hint(&self, message: &str) {
        if self.color {
            self.emit(&format!("  {}", message.dimmed()));
        } else {
            self.emit(&format!("  {message}"));
        }
    }

    /// A command or snippet the user should run or paste.
    pub fn code(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn blank(&self) {
        self.emit("");
    }

    fn emit(&self, line: &str) {
        if !self.quiet {
            let _ = writeln!(io::stderr().lock(), "{line}");
        }
    }

    /// Spinner on stderr; hidden when quiet or not on a terminal.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub(crate) fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.expect("serialization should not fail")
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![Item { name: "button" }, Item { name: "card" }]
    }

    fn render(format: &OutputFormat) -> String {
        render_list(format, &items(), |i| Row { name: i.name }, |i| i.name.to_string())
    }

    #[test]
    fn plain_is_one_name_per_line() {
        assert_eq!(render(&OutputFormat::Plain), "button\ncard");
    }

    #[test]
    fn structured_formats() {
        assert_eq!(
            render(&OutputFormat::JsonCompact),
            r#"[{"name":"button"},{"name":"card"}]"#
        );
        assert_eq!(render(&OutputFormat::Yaml), "- name: button\n- name: card\n");
    }

    #[test]
    fn table_has_header() {
        let table = render(&OutputFormat::Table);
        assert!(table.contains("Name"));
        assert!(table.contains("button"));
    }

    #[test]
    fn explicit_color_modes() {
        assert!(should_color(&ColorMode::Always));
        assert!(!should_color(&ColorMode::Never));
    }
}
