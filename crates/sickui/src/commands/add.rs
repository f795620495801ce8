//! `add` command handler.

use sickui_core::{InstallOptions, Installer, ItemOutcome, ProcessInstaller, resolve};

use crate::cli::{AddArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::Status;

use super::util;

pub async fn handle(args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let status = Status::new(global);
    let cwd = util::project_dir(&args.cwd)?;
    let config = util::project_config(&cwd)?;
    let client = util::registry_client(global)?;
    let prompter = util::prompter();

    let spinner = status.spinner("Fetching registry index...");
    let index = client.fetch_index().await;
    spinner.finish_and_clear();
    let index = index?;

    let requested: Vec<String> = if args.all {
        index.iter().map(|item| item.name.clone()).collect()
    } else if args.components.is_empty() {
        let names: Vec<String> = index.iter().map(|item| item.name.clone()).collect();
        prompter
            .multi_select("Which components would you like to add?", &names)?
            .into_iter()
            .filter_map(|i| names.get(i).cloned())
            .collect()
    } else {
        args.components
    };

    if requested.is_empty() {
        status.warn("No components selected. Exiting.");
        return Ok(());
    }

    let tree = resolve(&requested, &index);
    if tree.is_empty() {
        status.warn("Selected components not found. Exiting.");
        return Ok(());
    }

    let spinner = status.spinner("Fetching components...");
    let payload = client.fetch_tree(&tree).await;
    spinner.finish_and_clear();
    let payload = payload?;

    if !util::proceed(
        prompter.as_ref(),
        "Ready to install components and dependencies. Proceed?",
        args.yes,
    )? {
        return Ok(());
    }

    let options = InstallOptions {
        overwrite: args.overwrite,
        path: args.path.map(|path| cwd.join(path)),
        skip_install: args.skip_install,
    };
    let installer = Installer::new(&config, &options, prompter.as_ref(), &ProcessInstaller);

    status.info("Installing components...");
    let report = installer.install_all(&payload, &requested).await;

    for item in &report.items {
        let name = &item.name;
        match &item.outcome {
            ItemOutcome::Installed { deferred, .. } => {
                status.success(&format!("Added {name}"));
                if !deferred.is_empty() {
                    status.warn(&format!(
                        "Skipped installing dependencies for {name}: {}",
                        deferred.join(", ")
                    ));
                }
            }
            ItemOutcome::AlreadyExists => {
                status.warn(&format!(
                    "Component {name} already exists. Use {} to overwrite.",
                    status.code("--overwrite")
                ));
            }
            ItemOutcome::Kept => {
                status.info(&format!(
                    "Skipped {name}. To overwrite, run with the {} flag.",
                    status.code("--overwrite")
                ));
            }
            ItemOutcome::NoTarget => {
                status.info(&format!(
                    "Skipped {name}: examples are only added with {}",
                    status.code("--path")
                ));
            }
            ItemOutcome::Failed(err) => status.error(&format!("{name}: {err}")),
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::AddIncomplete {
            failed,
            total: report.items.len(),
        });
    }

    status.success("Done.");
    Ok(())
}
