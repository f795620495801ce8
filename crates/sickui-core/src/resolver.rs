// ── Registry dependency resolution ──
//
// Expands the requested names into the transitive closure of their
// `registryDependencies`. Unknown names are dropped, not reported: a typo
// simply resolves to nothing.

use std::collections::HashMap;

use indexmap::IndexMap;
use sickui_registry::RegistryItem;
use tracing::debug;

/// Resolve `requested` against `index`.
///
/// Depth first, each item before its dependencies, every name at most once
/// (first occurrence wins). Cycles terminate because a name already queued
/// is never visited again.
pub fn resolve(requested: &[String], index: &[RegistryItem]) -> Vec<RegistryItem> {
    let mut by_name: HashMap<&str, &RegistryItem> = HashMap::with_capacity(index.len());
    for item in index {
        by_name.entry(item.name.as_str()).or_insert(item);
    }

    let mut resolved: IndexMap<&str, &RegistryItem> = IndexMap::new();
    for name in requested {
        visit(name, &by_name, &mut resolved);
    }

    debug!(
        requested = requested.len(),
        resolved = resolved.len(),
        "resolved registry tree"
    );
    resolved.into_values().cloned().collect()
}

fn visit<'a>(
    name: &str,
    by_name: &HashMap<&str, &'a RegistryItem>,
    resolved: &mut IndexMap<&'a str, &'a RegistryItem>,
) {
    let Some(&item) = by_name.get(name) else {
        debug!(name, "skipping unknown component");
        return;
    };
    if resolved.contains_key(item.name.as_str()) {
        return;
    }
    resolved.insert(item.name.as_str(), item);
    for dependency in &item.registry_dependencies {
        visit(dependency, by_name, resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sickui_registry::ItemType;

    fn item(name: &str, deps: &[&str]) -> RegistryItem {
        RegistryItem {
            name: name.into(),
            item_type: ItemType::Ui,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            registry_dependencies: deps.iter().map(ToString::to_string).collect(),
            files: Vec::new(),
        }
    }

    fn names(items: &[RegistryItem]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    fn request(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn pulls_in_registry_dependencies() {
        let index = vec![item("button", &["slot-primitive"]), item("slot-primitive", &[])];
        let resolved = resolve(&request(&["button"]), &index);
        assert_eq!(names(&resolved), vec!["button", "slot-primitive"]);
    }

    #[test]
    fn closure_is_transitive_and_depth_first() {
        let index = vec![
            item("dialog", &["button", "overlay"]),
            item("button", &["slot"]),
            item("overlay", &[]),
            item("slot", &[]),
        ];
        let resolved = resolve(&request(&["dialog"]), &index);
        assert_eq!(names(&resolved), vec!["dialog", "button", "slot", "overlay"]);

        for resolved_item in &resolved {
            for dep in &resolved_item.registry_dependencies {
                assert!(resolved.iter().any(|i| &i.name == dep));
            }
        }
    }

    #[test]
    fn shared_dependencies_appear_once() {
        let index = vec![
            item("card", &["button"]),
            item("dialog", &["button"]),
            item("button", &[]),
        ];
        let resolved = resolve(&request(&["card", "dialog", "button"]), &index);
        assert_eq!(names(&resolved), vec!["card", "button", "dialog"]);
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        let index = vec![item("button", &[])];
        assert!(resolve(&request(&["nonexistent"]), &index).is_empty());
        assert!(resolve(&[], &index).is_empty());
    }

    #[test]
    fn dangling_dependencies_are_dropped() {
        let index = vec![item("button", &["missing", "slot"]), item("slot", &[])];
        let resolved = resolve(&request(&["button"]), &index);
        assert_eq!(names(&resolved), vec!["button", "slot"]);
    }

    #[test]
    fn cycles_terminate() {
        let index = vec![item("a", &["b"]), item("b", &["c"]), item("c", &["a"])];
        let resolved = resolve(&request(&["b"]), &index);
        assert_eq!(names(&resolved), vec!["b", "c", "a"]);
    }

    #[test]
    fn duplicate_index_entries_keep_the_first() {
        let mut second = item("button", &["extra"]);
        second.dependencies = vec!["react".into()];
        let index = vec![item("button", &[]), second, item("extra", &[])];
        let resolved = resolve(&request(&["button"]), &index);
        assert_eq!(names(&resolved), vec!["button"]);
        assert!(resolved[0].dependencies.is_empty());
    }
}
