// Registry item schema
//
// `RegistryItem` is what the rest of the workspace works with. The private
// `*Payload` types mirror the wire format one-to-one and are converted after
// deserialization, which is where the structural validation happens: serde
// rejects missing or mistyped fields, the conversion rejects files without
// content when the registry embeds source text.

use serde::{Deserialize, Serialize};

// ── Public model ─────────────────────────────────────────────────────

/// Where a registry item is installed, by kind.
///
/// The registry publishes these as `components:ui` etc.; the short forms are
/// accepted too.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum ItemType {
    /// Primitive UI component, installed under `{components}/ui`.
    #[serde(rename = "components:ui", alias = "ui")]
    #[strum(serialize = "ui")]
    Ui,
    /// Composite component, installed directly under `{components}`.
    #[serde(rename = "components:component", alias = "component")]
    #[strum(serialize = "component")]
    Component,
    /// Documentation example; only installed with an explicit `--path`.
    #[serde(rename = "components:example", alias = "example")]
    #[strum(serialize = "example")]
    Example,
}

/// A single source file belonging to a registry item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    pub name: String,
    pub content: String,
}

/// A component descriptor as published by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Vec<String>,
    #[serde(default, rename = "registryDependencies")]
    pub registry_dependencies: Vec<String>,
    pub files: Vec<RegistryFile>,
}

impl RegistryItem {
    /// Whether installing this item requires running the package manager.
    pub fn has_package_dependencies(&self) -> bool {
        !self.dependencies.is_empty() || !self.dev_dependencies.is_empty()
    }
}

// ── Wire format ──────────────────────────────────────────────────────

/// How file contents are delivered by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentMode {
    /// Every file carries its `content` inline.
    Embedded,
    /// Contents live behind a separate raw-source endpoint and may be absent.
    Split,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemPayload {
    name: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Vec<String>,
    #[serde(default, rename = "registryDependencies")]
    registry_dependencies: Vec<String>,
    files: Vec<FilePayload>,
}

#[derive(Debug, Deserialize)]
struct FilePayload {
    name: String,
    #[serde(default)]
    content: Option<String>,
}

impl ItemPayload {
    /// Validate and convert into the public model.
    ///
    /// In split mode a missing `content` becomes an empty string, to be
    /// filled from the raw-source endpoint by the client.
    pub(crate) fn into_item(self, mode: ContentMode) -> Result<RegistryItem, String> {
        let files = self
            .files
            .into_iter()
            .map(|file| match (file.content, mode) {
                (Some(content), _) => Ok(RegistryFile {
                    name: file.name,
                    content,
                }),
                (None, ContentMode::Split) => Ok(RegistryFile {
                    name: file.name,
                    content: String::new(),
                }),
                (None, ContentMode::Embedded) => Err(format!(
                    "file '{}' of item '{}' is missing field `content`",
                    file.name, self.name
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RegistryItem {
            name: self.name,
            item_type: self.item_type,
            dependencies: self.dependencies,
            dev_dependencies: self.dev_dependencies,
            registry_dependencies: self.registry_dependencies,
            files,
        })
    }
}
