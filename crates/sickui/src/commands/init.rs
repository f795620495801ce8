//! `init` command handler.

use sickui_config::COMPONENTS_JSON;
use sickui_core::init::{InitChoices, StylesheetOutcome, run_init};
use sickui_core::templates::PROJECT_DEPENDENCIES;
use sickui_core::{ProcessInstaller, ProjectInfo};

use crate::cli::{GlobalOpts, InitArgs};
use crate::error::CliError;
use crate::output::{self, Status};

use super::util;

pub async fn handle(args: InitArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let status = Status::new(global);
    let cwd = util::project_dir(&args.cwd)?;
    let info = ProjectInfo::detect(&cwd);
    let prompter = util::prompter();

    let choices = if args.defaults {
        InitChoices::default()
    } else {
        InitChoices::prompt(prompter.as_ref())?
    };
    let config = choices.into_config(&info);

    if cwd.join(COMPONENTS_JSON).is_file()
        && !util::proceed(
            prompter.as_ref(),
            "A components.json already exists. Overwrite it?",
            args.yes,
        )?
    {
        return Ok(());
    }

    let spinner = status.spinner("Initializing project...");
    let report = run_init(&cwd, config, &info, args.skip_install, &ProcessInstaller).await;
    spinner.finish_and_clear();
    let report = report?;

    let rel = |path: &std::path::Path| util::relative(&cwd, path);

    status.success(&format!("Created {}", rel(&report.config_path)));
    if report.tailwind_config_created {
        status.success(&format!("Created {}", rel(&report.tailwind_config)));
    } else {
        status.info(&format!("Kept existing {}", rel(&report.tailwind_config)));
    }

    let css = rel(&report.stylesheet);
    match &report.stylesheet_outcome {
        StylesheetOutcome::Merged { created, result } => {
            if *created {
                status.success(&format!("Created {css}"));
            }
            if result.normalized {
                status.info(&format!(
                    "Rewrote Tailwind v4 syntax in {css} for Tailwind v3"
                ));
            }
            if result.changed() {
                status.success(&format!(
                    "Added {} CSS variables to {css} ({} dark mode)",
                    result.added.len(),
                    result.strategy
                ));
            } else {
                status.info(&format!("All CSS variables already present in {css}"));
            }
        }
        StylesheetOutcome::Manual { error, snippet } => {
            status.warn(&format!("Could not update {css}: {error}"));
            status.hint("Add these CSS variables to your stylesheet manually:");
            output::print_output(snippet, global.quiet);
        }
    }

    if report.utils_created {
        status.success(&format!("Created {}", rel(&report.utils)));
    }
    status.success(&format!("Created {}", rel(&report.components_ui)));

    status.blank();
    status.info("Important: make sure to import the CSS file in your app.");
    status.hint(&format!("Add this to your {}:", report.import_hint.file));
    status.hint(&status.code(&report.import_hint.statement));
    status.blank();

    if report.installed.is_empty() {
        status.warn(&format!(
            "Skipped installing dependencies: {}",
            PROJECT_DEPENDENCIES.join(", ")
        ));
    } else {
        status.success("Installed dependencies");
    }

    status.blank();
    status.success("Success! Project initialization completed.");
    Ok(())
}
