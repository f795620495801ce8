// ── Dialect normalization ──
//
// Rewrites a Tailwind v4 stylesheet into v3 form: the bare import becomes
// the three `@tailwind` directives and theme tokens move into plain `:root`
// and `.dark` rules.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use super::document::{Block, Declaration, Node, Stylesheet, push_text};

pub const V3_DIRECTIVES: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

const LAST_DIRECTIVE: &str = "@tailwind utilities;";

static V4_IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+["']tailwindcss["'];?\s*"#)
        .expect("V4_IMPORT_STATEMENT: invalid regex pattern")
});

/// Tokens pulled out of theme blocks, deduplicated by name (first wins).
#[derive(Debug, Default)]
struct Extracted {
    light: IndexMap<String, String>,
    dark: IndexMap<String, String>,
}

impl Extracted {
    fn add(target: &mut IndexMap<String, String>, declarations: Vec<Declaration>) {
        for Declaration { name, value } in declarations {
            if value.starts_with("var(") {
                continue;
            }
            let name = name
                .strip_prefix("color-")
                .map_or_else(|| name.clone(), str::to_string);
            target.entry(name).or_insert(value);
        }
    }
}

/// Convert v4 syntax to v3. A stylesheet without v4 markers comes back
/// unchanged.
pub fn to_v3(mut sheet: Stylesheet) -> Stylesheet {
    if !sheet.has_v4_markers() {
        return sheet;
    }

    for node in &mut sheet.nodes {
        if let Node::Text(text) = node {
            if V4_IMPORT_STATEMENT.is_match(text) {
                *text = V4_IMPORT_STATEMENT
                    .replace_all(text, V3_DIRECTIVES)
                    .into_owned();
            }
        }
    }

    let mut extracted = Extracted::default();
    take_dark_media_themes(&mut sheet.nodes, &mut extracted.dark);
    take_dark_color_rules(&mut sheet.nodes, &mut extracted.dark);
    take_themes(&mut sheet.nodes, &mut extracted.light);

    debug!(
        light = extracted.light.len(),
        dark = extracted.dark.len(),
        "normalized v4 stylesheet"
    );

    insert_token_rules(sheet, &extracted)
}

/// `@theme` blocks directly inside dark color-scheme queries. Queries left
/// empty are dropped.
fn take_dark_media_themes(nodes: &mut Vec<Node>, dark: &mut IndexMap<String, String>) {
    for node in nodes.iter_mut() {
        if let Node::Block(media) = node {
            if media.is_dark_media() {
                media.children.retain(|child| match child {
                    Node::Block(theme) if theme.is_theme() => {
                        Extracted::add(dark, theme.declarations());
                        false
                    }
                    _ => true,
                });
            }
        }
    }
    nodes.retain(|node| !matches!(node, Node::Block(media) if media.is_dark_media() && media.is_blank()));
}

/// `.dark` rules carrying `--color-*` tokens, at any depth. Returns whether
/// anything was removed so emptied wrappers can go too.
fn take_dark_color_rules(nodes: &mut Vec<Node>, dark: &mut IndexMap<String, String>) -> bool {
    let mut removed = false;
    nodes.retain_mut(|node| {
        let Node::Block(block) = node else {
            return true;
        };
        let declarations = block.declarations();
        if block.is_dark_class() && declarations.iter().any(|d| d.name.starts_with("color-")) {
            Extracted::add(dark, declarations);
            removed = true;
            return false;
        }
        if take_dark_color_rules(&mut block.children, dark) && block.is_blank() {
            removed = true;
            return false;
        }
        true
    });
    removed
}

/// Every remaining `@theme` block, at any depth.
fn take_themes(nodes: &mut Vec<Node>, light: &mut IndexMap<String, String>) {
    nodes.retain_mut(|node| {
        let Node::Block(block) = node else {
            return true;
        };
        if block.is_theme() {
            Extracted::add(light, block.declarations());
            return false;
        }
        take_themes(&mut block.children, light);
        true
    });
}

fn rule(selector: &str, tokens: &IndexMap<String, String>) -> Block {
    let lines: Vec<String> = tokens
        .iter()
        .map(|(name, value)| format!("  --{name}: {value};"))
        .collect();
    Block::new(format!("{selector} "), format!("\n{}\n", lines.join("\n")))
}

/// Place `:root` and `.dark` right after the directives, or first when the
/// stylesheet has none.
fn insert_token_rules(sheet: Stylesheet, extracted: &Extracted) -> Stylesheet {
    let mut rules = Vec::new();
    if !extracted.light.is_empty() {
        rules.push(Node::Block(rule(":root", &extracted.light)));
        rules.push(Node::Text("\n\n".into()));
    }
    if !extracted.dark.is_empty() {
        rules.push(Node::Block(rule(".dark", &extracted.dark)));
        rules.push(Node::Text("\n\n".into()));
    }
    if rules.is_empty() {
        return sheet;
    }

    let anchor = sheet.nodes.iter().position(|node| {
        matches!(node, Node::Text(text) if text.contains(LAST_DIRECTIVE))
    });

    let mut nodes = Vec::with_capacity(sheet.nodes.len() + rules.len() + 1);
    match anchor {
        Some(index) => {
            for (i, node) in sheet.nodes.into_iter().enumerate() {
                match node {
                    Node::Text(text) if i == index => {
                        let (head, tail) = split_after_directive(&text);
                        push_text(&mut nodes, head);
                        push_text(&mut nodes, "\n");
                        for rule in rules.drain(..) {
                            append(&mut nodes, rule);
                        }
                        push_text(&mut nodes, tail);
                    }
                    other => append(&mut nodes, other),
                }
            }
        }
        None => {
            for node in rules.into_iter().chain(sheet.nodes) {
                append(&mut nodes, node);
            }
        }
    }
    Stylesheet { nodes }
}

fn split_after_directive(text: &str) -> (&str, &str) {
    let Some(pos) = text.find(LAST_DIRECTIVE) else {
        return (text, "");
    };
    let mut end = pos + LAST_DIRECTIVE.len();
    if text[end..].starts_with('\n') {
        end += 1;
    }
    text.split_at(end)
}

fn append(nodes: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(text) => push_text(nodes, &text),
        block @ Node::Block(_) => nodes.push(block),
    }
}

// ── Cosmetic fix-up ──────────────────────────────────────────────────

/// A light color-scheme query holding the dark background is a mislabeled
/// dark query.
pub fn fix_inverted_media(mut sheet: Stylesheet) -> Stylesheet {
    for node in &mut sheet.nodes {
        if let Node::Block(block) = node {
            if block.is_light_media() && block.body().contains("--background: #0a0a0a;") {
                debug!("relabeling light color-scheme query as dark");
                block.prelude = block.prelude.replacen(
                    "prefers-color-scheme: light",
                    "prefers-color-scheme: dark",
                    1,
                );
            }
        }
    }
    sheet
}
