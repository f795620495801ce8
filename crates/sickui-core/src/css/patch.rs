// ── Patch synthesis ──
//
// Adds missing tokens to a stylesheet with as little disturbance as
// possible: v3 appends rules, v4 splices into existing theme blocks first.

use super::DarkStrategy;
use super::catalog::Token;
use super::document::{Block, Node, Stylesheet};

pub const BASE_STYLES_MARKER: &str = "@apply border-border";

pub const BASE_STYLES: &str = "/* SickUI base styles */
@layer base {
  * {
    @apply border-border;
  }
  body {
    @apply bg-background text-foreground;
  }
}";

const THEME_LABEL: &str = "/* SickUI theme variables */";
const DARK_THEME_LABEL: &str = "/* SickUI dark theme variables */";

/// Output text with blank-line separated blocks appended.
struct Appender {
    out: String,
}

impl Appender {
    fn new(existing: &str) -> Self {
        Self {
            out: existing.trim_end().to_string(),
        }
    }

    fn push(&mut self, block: &str) {
        if !self.out.is_empty() {
            self.out.push_str("\n\n");
        }
        self.out.push_str(block);
    }

    fn finish(mut self) -> String {
        self.out.push('\n');
        self.out
    }
}

fn v3_lines(tokens: &[&Token], dark: bool, indent: &str) -> String {
    tokens
        .iter()
        .map(|token| format!("{indent}{}: {};", token.property(), token.value(dark)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn v4_lines(tokens: &[&Token], dark: bool, indent: &str) -> String {
    tokens
        .iter()
        .map(|token| format!("{indent}{}: {};", token.v4_property(), token.value(dark)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap(outer: &str, inner: &str, lines: &str) -> String {
    format!("{outer} {{\n  {inner} {{\n{lines}\n  }}\n}}")
}

/// Append `:root` and dark rules. `light` must be non-empty.
pub fn patch_v3(
    sheet: &Stylesheet,
    light: &[&Token],
    dark: &[&Token],
    strategy: DarkStrategy,
    base_styles: bool,
) -> String {
    let mut out = Appender::new(&sheet.to_string());
    out.push(&wrap("@layer base", ":root", &v3_lines(light, false, "    ")));
    if !dark.is_empty() {
        let lines = v3_lines(dark, true, "    ");
        out.push(&match strategy {
            DarkStrategy::Media => wrap("@media (prefers-color-scheme: dark)", ":root", &lines),
            DarkStrategy::Class => wrap("@layer base", ".dark", &lines),
        });
    }
    if base_styles {
        out.push(BASE_STYLES);
    }
    out.finish()
}

/// Splice into the first top-level `@theme` and the matching dark block,
/// appending whatever has no home yet.
pub fn patch_v4(
    mut sheet: Stylesheet,
    light: &[&Token],
    dark: &[&Token],
    strategy: DarkStrategy,
    base_styles: bool,
) -> String {
    let mut appended = Vec::new();

    let theme = sheet.nodes.iter_mut().find_map(|node| match node {
        Node::Block(block) if block.is_theme() => Some(block),
        _ => None,
    });

    match theme {
        Some(theme) => {
            let lines: Vec<String> = light
                .iter()
                .map(|token| format!("{}: {};", token.v4_property(), token.light))
                .collect();
            splice(theme, THEME_LABEL, &lines);

            if !dark.is_empty() {
                let lines: Vec<String> = dark
                    .iter()
                    .map(|token| format!("{}: {};", token.v4_property(), token.dark))
                    .collect();
                let target = match strategy {
                    DarkStrategy::Media => dark_media_theme(&mut sheet.nodes),
                    DarkStrategy::Class => find_block_mut(&mut sheet.nodes, &Block::is_dark_class),
                };
                match target {
                    Some(block) => splice(block, DARK_THEME_LABEL, &lines),
                    None => appended.push(dark_block_v4(dark, strategy)),
                }
            }
        }
        None => {
            appended.push(format!("@theme {{\n{}\n}}", v4_lines(light, false, "  ")));
            if !dark.is_empty() {
                appended.push(dark_block_v4(dark, strategy));
            }
        }
    }

    let mut out = Appender::new(&sheet.to_string());
    for block in &appended {
        out.push(block);
    }
    if base_styles {
        out.push(BASE_STYLES);
    }
    out.finish()
}

fn dark_block_v4(dark: &[&Token], strategy: DarkStrategy) -> String {
    let lines = v4_lines(dark, true, "    ");
    match strategy {
        DarkStrategy::Media => wrap("@media (prefers-color-scheme: dark)", "@theme", &lines),
        DarkStrategy::Class => wrap("@layer base", ".dark", &lines),
    }
}

/// First `@theme` directly inside a top-level dark color-scheme query.
fn dark_media_theme(nodes: &mut [Node]) -> Option<&mut Block> {
    nodes
        .iter_mut()
        .filter_map(|node| match node {
            Node::Block(media) if media.is_dark_media() => Some(media),
            _ => None,
        })
        .find_map(|media| {
            media.children.iter_mut().find_map(|child| match child {
                Node::Block(theme) if theme.is_theme() => Some(theme),
                _ => None,
            })
        })
}

fn find_block_mut<'a>(nodes: &'a mut [Node], predicate: &dyn Fn(&Block) -> bool) -> Option<&'a mut Block> {
    for node in nodes {
        if let Node::Block(block) = node {
            if predicate(block) {
                return Some(block);
            }
            if let Some(found) = find_block_mut(&mut block.children, predicate) {
                return Some(found);
            }
        }
    }
    None
}

/// Insert labeled declarations before the block's closing brace, indented
/// one level deeper than the brace itself.
fn splice(block: &mut Block, label: &str, declarations: &[String]) {
    if !matches!(block.children.last(), Some(Node::Text(_))) {
        block.children.push(Node::Text(String::new()));
    }
    let Some(Node::Text(text)) = block.children.last_mut() else {
        return;
    };

    let kept = text.trim_end().len();
    let closing = match text[kept..].rfind('\n') {
        Some(newline) => text[kept + newline + 1..].to_string(),
        None => String::new(),
    };
    let indent = format!("{closing}  ");

    text.truncate(kept);
    text.push('\n');
    text.push_str(&indent);
    text.push_str(label);
    for declaration in declarations {
        text.push('\n');
        text.push_str(&indent);
        text.push_str(declaration);
    }
    text.push('\n');
    text.push_str(&closing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::catalog::lookup;
    use pretty_assertions::assert_eq;

    fn tokens(names: &[&str]) -> Vec<&'static Token> {
        names.iter().filter_map(|name| lookup(name)).collect()
    }

    #[test]
    fn v3_appends_root_and_class_dark_rules() {
        let sheet = Stylesheet::parse("@tailwind base;\n");
        let out = patch_v3(
            &sheet,
            &tokens(&["ring", "radius"]),
            &tokens(&["ring"]),
            DarkStrategy::Class,
            false,
        );
        assert_eq!(
            out,
            "@tailwind base;\n\n@layer base {\n  :root {\n    --ring: 221.2 83.2% 53.3%;\n    --radius: 0.5rem;\n  }\n}\n\n@layer base {\n  .dark {\n    --ring: 224.3 76.3% 94.1%;\n  }\n}\n"
        );
    }

    #[test]
    fn v3_media_strategy_uses_color_scheme_query() {
        let out = patch_v3(
            &Stylesheet::default(),
            &tokens(&["input"]),
            &tokens(&["input"]),
            DarkStrategy::Media,
            true,
        );
        assert!(out.starts_with("@layer base {\n  :root {\n    --input: 214.3 31.8% 91.4%;"));
        assert!(out.contains("@media (prefers-color-scheme: dark) {\n  :root {\n    --input: 0 0% 8%;\n  }\n}"));
        assert!(out.ends_with("@apply bg-background text-foreground;\n  }\n}\n"));
    }

    #[test]
    fn v4_splices_into_existing_theme_and_dark_rule() {
        let sheet = Stylesheet::parse(
            "@import \"tailwindcss\";\n\n@theme {\n  --color-brand: red;\n}\n\n.dark {\n  --color-brand: blue;\n}\n",
        );
        let out = patch_v4(
            sheet,
            &tokens(&["muted", "radius"]),
            &tokens(&["muted"]),
            DarkStrategy::Class,
            false,
        );
        assert_eq!(
            out,
            "@import \"tailwindcss\";\n\n@theme {\n  --color-brand: red;\n  /* SickUI theme variables */\n  --color-muted: 210 40% 96%;\n  --radius: 0.5rem;\n}\n\n.dark {\n  --color-brand: blue;\n  /* SickUI dark theme variables */\n  --color-muted: 0 0% 8%;\n}\n"
        );
    }

    #[test]
    fn v4_media_strategy_appends_dark_theme_when_absent() {
        let sheet = Stylesheet::parse("@theme { --color-brand: red; }\n@media (prefers-color-scheme: dark) { body { color: white; } }\n");
        let out = patch_v4(sheet, &tokens(&["card"]), &tokens(&["card"]), DarkStrategy::Media, false);
        assert!(out.starts_with("@theme { --color-brand: red;\n  /* SickUI theme variables */\n  --color-card: 0 0% 100%;\n}"));
        assert!(out.ends_with("@media (prefers-color-scheme: dark) {\n  @theme {\n    --color-card: 0 0% 2.4%;\n  }\n}\n"));
    }

    #[test]
    fn v4_without_theme_appends_fresh_blocks() {
        let sheet = Stylesheet::parse("@import \"tailwindcss\";\n");
        let out = patch_v4(sheet, &tokens(&["border"]), &[], DarkStrategy::Class, false);
        assert_eq!(
            out,
            "@import \"tailwindcss\";\n\n@theme {\n  --color-border: 214.3 31.8% 91.4%;\n}\n"
        );
    }

    #[test]
    fn splice_keeps_nested_indentation() {
        let mut sheet = Stylesheet::parse("@media (prefers-color-scheme: dark) {\n  @theme {\n    --color-a: b;\n  }\n}");
        let theme = dark_media_theme(&mut sheet.nodes);
        assert!(theme.is_some());
        if let Some(theme) = theme {
            splice(theme, "/* x */", &["--color-c: d;".to_string()]);
        }
        assert_eq!(
            sheet.to_string(),
            "@media (prefers-color-scheme: dark) {\n  @theme {\n    --color-a: b;\n    /* x */\n    --color-c: d;\n  }\n}"
        );
    }
}
