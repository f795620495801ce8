//! `check` command handler.

use serde::Serialize;
use sickui_core::diagnose::{Finding, Level, diagnose, has_errors};

use crate::cli::{CheckArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Status};

use super::util;

#[derive(Serialize)]
struct CheckReport<'a> {
    ok: bool,
    findings: &'a [Finding],
}

pub fn handle(args: &CheckArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let status = Status::new(global);
    let cwd = util::project_dir(&args.cwd)?;
    let findings = diagnose(&cwd);

    let report = CheckReport {
        ok: !has_errors(&findings),
        findings: &findings,
    };
    let out = match global.output {
        OutputFormat::Table => {
            print_findings(&status, &findings);
            return Ok(());
        }
        OutputFormat::Plain => findings
            .iter()
            .map(|f| format!("{}\t{}", f.level, f.message))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => output::render_json(&report, false),
        OutputFormat::JsonCompact => output::render_json(&report, true),
        OutputFormat::Yaml => output::render_yaml(&report),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_findings(status: &Status, findings: &[Finding]) {
    status.info("Checking your SickUI setup...");
    status.blank();
    for finding in findings {
        match finding.level {
            Level::Ok => status.success(&finding.message),
            Level::Warn => status.warn(&finding.message),
            Level::Error => status.error(&finding.message),
        }
        if let Some(hint) = &finding.hint {
            status.hint(hint);
        }
    }
    status.blank();
    if has_errors(findings) {
        status.warn("Setup check found problems. Fix the errors above and run this command again.");
    } else {
        status.success("Setup check completed!");
        status.hint("Still seeing unstyled components? Restart your development server.");
    }
}
