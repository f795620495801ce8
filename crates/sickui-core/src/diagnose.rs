// ── Setup diagnostics ──
//
// Read-only inspection behind `check`. Two passes: the PostCSS/Tailwind
// toolchain, then the SickUI files. A blocking error ends its pass; later
// checks in that pass depend on what was missing.

use std::path::Path;

use serde::Serialize;
use sickui_config::{ResolvedConfig, find_project_config};
use tracing::debug;

use crate::css::{Stylesheet, TailwindDialect};
use crate::project::{PackageJson, ProjectInfo, detect_dialect, parse_major_version};
use crate::templates::CONTENT_PATHS;

/// Variables without which components render unstyled.
pub const REQUIRED_VARIABLES: [&str; 7] = [
    "background",
    "foreground",
    "primary",
    "primary-foreground",
    "border",
    "input",
    "ring",
];

pub const POSTCSS_CONFIGS: [&str; 5] = [
    "postcss.config.js",
    "postcss.config.mjs",
    "postcss.config.cjs",
    ".postcssrc.js",
    ".postcssrc.json",
];

const LAYOUTS: [&str; 2] = ["app/layout.tsx", "src/app/layout.tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Finding {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            level: Level::Ok,
            message: message.into(),
            hint: None,
        }
    }

    fn warn(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            level: Level::Warn,
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    fn error(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// Pass result: `Err` carries the blocking finding.
type Step = Result<(), Finding>;

struct Collector(Vec<Finding>);

impl Collector {
    fn push(&mut self, finding: Finding) {
        self.0.push(finding);
    }

    fn finish(&mut self, pass: Step) {
        if let Err(blocking) = pass {
            debug!(message = %blocking.message, "blocking finding");
            self.0.push(blocking);
        }
    }
}

/// Inspect the project in `cwd`.
pub fn diagnose(cwd: &Path) -> Vec<Finding> {
    let mut out = Collector(Vec::new());
    let pass = toolchain(cwd, &mut out);
    out.finish(pass);
    let pass = project_files(cwd, &mut out);
    out.finish(pass);
    out.0
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.level == Level::Error)
}

// ── Toolchain ────────────────────────────────────────────────────────

fn toolchain(cwd: &Path, out: &mut Collector) -> Step {
    let package = PackageJson::read(cwd).ok_or_else(|| {
        Finding::error(
            "package.json not found",
            "Run this command from the root of your project",
        )
    })?;

    let version = package.version_of("tailwindcss").ok_or_else(|| {
        Finding::error("Tailwind CSS not installed", "Run: npm install tailwindcss@latest")
    })?;
    let cleaned: String = version
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    out.push(Finding::ok(format!("Tailwind CSS {cleaned} installed")));

    if package.has("@tailwindcss/postcss") {
        out.push(Finding::ok("@tailwindcss/postcss installed (Tailwind v4+)"));
    } else if package.has("postcss") {
        out.push(Finding::ok("PostCSS installed"));
    } else {
        return Err(Finding::error(
            "PostCSS not installed",
            "Run: npm install postcss@latest (or @tailwindcss/postcss@latest for Tailwind v4+)",
        ));
    }

    if package.has("autoprefixer") {
        out.push(Finding::ok("Autoprefixer installed"));
    } else if parse_major_version(version).is_some_and(|major| major < 4) {
        out.push(Finding::warn(
            "Autoprefixer not installed (recommended)",
            "Run: npm install autoprefixer@latest",
        ));
    }

    let Some((name, content)) = POSTCSS_CONFIGS
        .iter()
        .find_map(|name| Some((*name, std::fs::read_to_string(cwd.join(name)).ok()?)))
    else {
        return Err(Finding::error(
            "PostCSS config not found",
            "Create postcss.config.js with plugins: { tailwindcss: {}, autoprefixer: {} }, or plugins: [\"@tailwindcss/postcss\"] for Tailwind v4+",
        ));
    };
    out.push(Finding::ok(format!("PostCSS config found: {name}")));

    let v4_plugin = content.contains("@tailwindcss/postcss");
    if v4_plugin {
        out.push(Finding::ok("PostCSS config includes Tailwind CSS (v4+ format)"));
    } else if content.contains("tailwindcss") {
        out.push(Finding::ok("PostCSS config includes Tailwind CSS"));
        if content.contains("tailwindcss: {}") {
            out.push(Finding::warn(
                "Old PostCSS config format detected",
                "Install @tailwindcss/postcss and use plugins: [\"@tailwindcss/postcss\"]",
            ));
        }
    } else {
        out.push(Finding::warn(
            "PostCSS config doesn't include Tailwind CSS",
            "Add tailwindcss (v3) or @tailwindcss/postcss (v4+) to the plugins",
        ));
    }
    Ok(())
}

// ── Project files ────────────────────────────────────────────────────

fn project_files(cwd: &Path, out: &mut Collector) -> Step {
    const RUN_INIT: &str = "Run sickui init to create it";

    if find_project_config(cwd).is_none() {
        return Err(Finding::error("components.json not found", "Run sickui init first"));
    }
    let resolved = ResolvedConfig::discover(cwd)
        .map_err(|e| Finding::error(format!("components.json is invalid: {e}"), "Fix or delete it, then run sickui init"))?;
    out.push(Finding::ok("components.json found"));

    let css_name = &resolved.config.tailwind.css;
    let css = std::fs::read_to_string(&resolved.paths.tailwind_css)
        .map_err(|_| Finding::error(format!("CSS file not found: {css_name}"), RUN_INIT))?;
    out.push(Finding::ok(format!("CSS file found: {css_name}")));

    let declared = Stylesheet::parse(&css).declared_names();
    let missing: Vec<String> = REQUIRED_VARIABLES
        .iter()
        .filter(|name| {
            !declared.contains(**name) && !declared.contains(&format!("color-{name}"))
        })
        .map(|name| format!("--{name}"))
        .collect();
    if !missing.is_empty() {
        return Err(Finding::error(
            format!("Missing CSS variables: {}", missing.join(", ")),
            "Run sickui init to merge the design tokens into your stylesheet",
        ));
    }
    out.push(Finding::ok("All required CSS variables found"));

    let tailwind_name = &resolved.config.tailwind.config;
    match std::fs::read_to_string(&resolved.paths.tailwind_config) {
        Ok(config) => {
            out.push(Finding::ok("Tailwind config found"));
            if CONTENT_PATHS.iter().any(|path| config.contains(path)) {
                out.push(Finding::ok("Tailwind config has content paths"));
            } else {
                out.push(Finding::warn(
                    "Tailwind config might be missing content paths",
                    format!("Include {} in content", CONTENT_PATHS.join(" or ")),
                ));
            }
        }
        Err(_) if detect_dialect(&resolved.root) == TailwindDialect::V4 => {
            out.push(Finding::warn(
                format!("Tailwind config not found: {tailwind_name}"),
                "Optional with Tailwind v4, sources are detected automatically",
            ));
        }
        Err(_) => {
            return Err(Finding::error(
                format!("Tailwind config not found: {tailwind_name}"),
                RUN_INIT,
            ));
        }
    }

    let utils = ["ts", "js"]
        .iter()
        .map(|ext| resolved.paths.utils.with_extension(ext))
        .find(|path| path.is_file());
    if utils.is_none() {
        return Err(Finding::error(
            format!("Utils file not found: {}", resolved.config.aliases.utils),
            RUN_INIT,
        ));
    }
    out.push(Finding::ok("Utils file found"));

    let info = ProjectInfo::detect(&resolved.root);
    if info.is_next_js && info.is_app_dir {
        check_layout(&resolved, out);
    }
    Ok(())
}

fn check_layout(resolved: &ResolvedConfig, out: &mut Collector) {
    let Some((layout, content)) = LAYOUTS.iter().find_map(|layout| {
        Some((*layout, std::fs::read_to_string(resolved.root.join(layout)).ok()?))
    }) else {
        out.push(Finding::warn(
            "No layout.tsx found",
            "Import your CSS file in your root layout component",
        ));
        return;
    };

    let css_file = Path::new(&resolved.config.tailwind.css)
        .file_name()
        .map_or_else(|| "globals.css".into(), |name| name.to_string_lossy().into_owned());
    let statement = format!("import \"./{css_file}\"");
    if content.contains(&statement) {
        out.push(Finding::ok(format!("CSS imported in {layout}")));
    } else {
        out.push(Finding::warn(
            format!("CSS not imported in {layout}"),
            format!("Add: {statement}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn levels(findings: &[Finding]) -> Vec<Level> {
        findings.iter().map(|f| f.level).collect()
    }

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    /// A Tailwind v3 Next.js app that passes every check.
    fn healthy(dir: &Path) {
        fs::write(
            dir.join("package.json"),
            r#"{ "dependencies": { "next": "14.2.0" },
                 "devDependencies": { "tailwindcss": "^3.4.1", "postcss": "^8", "autoprefixer": "^10" } }"#,
        )
        .unwrap();
        fs::write(
            dir.join("postcss.config.mjs"),
            "export default { plugins: { tailwindcss: {}, autoprefixer: {} } }\n",
        )
        .unwrap();
        fs::create_dir_all(dir.join("app")).unwrap();
        let config = sickui_config::ProjectConfig::default();
        sickui_config::save_project_config(dir, &config).unwrap();
        fs::write(
            dir.join("app/globals.css"),
            crate::css::manual_snippet(TailwindDialect::V3),
        )
        .unwrap();
        fs::write(dir.join("tailwind.config.js"), crate::templates::tailwind_config(false)).unwrap();
        fs::create_dir_all(dir.join("lib")).unwrap();
        fs::write(dir.join("lib/utils.ts"), crate::templates::UTILS_TS).unwrap();
        fs::write(dir.join("app/layout.tsx"), "import \"./globals.css\"\n").unwrap();
    }

    #[test]
    fn healthy_project_has_no_errors() {
        let dir = tempfile::tempdir().unwrap();
        healthy(dir.path());
        let findings = diagnose(dir.path());

        assert!(!has_errors(&findings), "{findings:#?}");
        let warnings: Vec<_> = findings.iter().filter(|f| f.level == Level::Warn).collect();
        // Only the legacy `tailwindcss: {}` plugin entry is flagged.
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Old PostCSS config format detected");
        assert_eq!(findings.last().unwrap().message, "CSS imported in app/layout.tsx");
    }

    #[test]
    fn missing_package_json_only_stops_the_toolchain_pass() {
        let dir = tempfile::tempdir().unwrap();
        let findings = diagnose(dir.path());
        assert_eq!(
            messages(&findings),
            vec!["package.json not found", "components.json not found"]
        );
        assert_eq!(levels(&findings), vec![Level::Error, Level::Error]);
    }

    #[test]
    fn missing_variables_block_later_checks() {
        let dir = tempfile::tempdir().unwrap();
        healthy(dir.path());
        fs::write(dir.path().join("app/globals.css"), ":root { --background: 0 0% 100%; }\n").unwrap();

        let findings = diagnose(dir.path());
        let last = findings.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert!(last.message.contains("--foreground"));
        assert!(!last.message.contains("--background,"));
        assert!(!messages(&findings).contains(&"Tailwind config found"));
    }

    #[test]
    fn v4_aliases_satisfy_required_variables() {
        let dir = tempfile::tempdir().unwrap();
        healthy(dir.path());
        fs::write(dir.path().join("app/globals.css"), crate::css::manual_snippet(TailwindDialect::V4)).unwrap();
        assert!(messages(&diagnose(dir.path())).contains(&"All required CSS variables found"));
    }

    #[test]
    fn layout_without_import_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        healthy(dir.path());
        fs::write(dir.path().join("app/layout.tsx"), "export default function Root() {}\n").unwrap();

        let last = diagnose(dir.path()).pop().unwrap();
        assert_eq!(last.level, Level::Warn);
        assert_eq!(last.hint.as_deref(), Some("Add: import \"./globals.css\""));
    }

    #[test]
    fn postcss_v4_plugin_is_recognized() {
        let dir = tempfile::tempdir().unwrap();
        healthy(dir.path());
        fs::write(
            dir.path().join("package.json"),
            r#"{ "devDependencies": { "tailwindcss": "^4.0.0", "@tailwindcss/postcss": "^4.0.0" } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("postcss.config.mjs"),
            "export default { plugins: [\"@tailwindcss/postcss\"] }\n",
        )
        .unwrap();
        fs::remove_file(dir.path().join("tailwind.config.js")).unwrap();

        let findings = diagnose(dir.path());
        assert!(!has_errors(&findings), "{findings:#?}");
        assert!(messages(&findings).contains(&"PostCSS config includes Tailwind CSS (v4+ format)"));
        assert!(messages(&findings).contains(&"Tailwind config not found: tailwind.config.js"));
    }
}
