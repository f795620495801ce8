//! `list` command handler.

use serde::Serialize;
use sickui_registry::{ItemType, RegistryItem};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Status};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    dependencies: &'a [String],
    #[serde(rename = "registryDependencies")]
    registry_dependencies: &'a [String],
}

impl<'a> From<&'a RegistryItem> for Entry<'a> {
    fn from(item: &'a RegistryItem) -> Self {
        Self {
            name: &item.name,
            dependencies: &item.dependencies,
            registry_dependencies: &item.registry_dependencies,
        }
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Dependencies")]
    dependencies: String,
    #[tabled(rename = "Uses")]
    registry_dependencies: String,
}

impl From<&Entry<'_>> for EntryRow {
    fn from(e: &Entry<'_>) -> Self {
        Self {
            name: e.name.to_string(),
            dependencies: e.dependencies.join(", "),
            registry_dependencies: e.registry_dependencies.join(", "),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let status = Status::new(global);
    let client = util::registry_client(global)?;

    let spinner = status.spinner("Fetching registry index...");
    let index = client.fetch_index().await;
    spinner.finish_and_clear();
    let index = index?;

    if index.is_empty() {
        status.warn("No components found in registry.");
        return Ok(());
    }

    let components: Vec<Entry<'_>> = index
        .iter()
        .filter(|item| item.item_type == ItemType::Ui)
        .map(Entry::from)
        .collect();

    let out = output::render_list(
        &global.output,
        &components,
        |e| EntryRow::from(e),
        |e| e.name.to_string(),
    );
    output::print_output(&out, global.quiet);

    let count = components.len();
    status.blank();
    status.info(&format!(
        "Total: {count} component{}",
        if count == 1 { "" } else { "s" }
    ));
    status.info(&format!(
        "Run {} to add a component.",
        status.code("sickui add <component>")
    ));
    Ok(())
}
