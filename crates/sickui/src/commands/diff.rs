//! `diff` command handler.

use sickui_core::diff::{DiffStatus, compare, validate_component_name};

use crate::cli::{DiffArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::Status;

use super::util;

pub async fn handle(args: DiffArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let status = Status::new(global);
    let cwd = util::project_dir(&args.cwd)?;
    let config = util::project_config(&cwd)?;
    let name = args.component;
    validate_component_name(&name)?;

    let client = util::registry_client(global)?;
    let spinner = status.spinner(&format!("Fetching {name}..."));
    let item = client.fetch_item(&name).await;
    spinner.finish_and_clear();
    let item = item.map_err(|err| {
        if err.is_not_found() {
            CliError::NotFound { name: name.clone() }
        } else {
            err.into()
        }
    })?;

    match compare(&config, &item)? {
        DiffStatus::UpToDate => status.success(&format!("Component {name} is up to date.")),
        DiffStatus::Changed { lines } => {
            status.warn(&format!(
                "Component {name} has changes ({lines} line{}).",
                if lines == 1 { "" } else { "s" }
            ));
            status.hint(&format!(
                "Run {} to update to the latest version.",
                status.code(&format!("sickui add {name} --overwrite"))
            ));
        }
        DiffStatus::Missing { .. } => {
            status.warn(&format!("Component {name} not found in your project."));
            status.hint(&format!(
                "Run {} to add it.",
                status.code(&format!("sickui add {name}"))
            ));
        }
    }
    Ok(())
}
