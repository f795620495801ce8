// ── Stylesheet document ──
//
// A lossless tree over CSS source: runs of raw text and brace-delimited
// blocks. Braces inside comments and quoted strings are not structural.
// `Stylesheet::parse(s).to_string() == s` for every input, including
// unbalanced ones (stray `}` stay text, unclosed blocks serialize without
// their missing brace).

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*[\s\S]*?(?:\*/|$)").expect("COMMENT: invalid regex pattern")
});

static PROPERTY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--([\w-]+)\s*:").expect("PROPERTY_NAME: invalid regex pattern")
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--([\w-]+)\s*:\s*([^;]*)").expect("DECLARATION: invalid regex pattern")
});

static DARK_MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"prefers-color-scheme:\s*dark").expect("DARK_MEDIA: invalid regex pattern")
});

static DARK_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.dark\s*$").expect("DARK_CLASS: invalid regex pattern"));

static V4_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+["']tailwindcss["']"#).expect("V4_IMPORT: invalid regex pattern")
});

// ── Tree ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Declarations, at-statements, comments and whitespace.
    Text(String),
    Block(Block),
}

/// `prelude { children }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Everything between the previous statement and `{`, trailing
    /// whitespace included.
    pub prelude: String,
    pub children: Vec<Node>,
    pub closed: bool,
}

/// A custom-property declaration, name without the leading `--`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn new(prelude: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            prelude: prelude.into(),
            children: vec![Node::Text(body.into())],
            closed: true,
        }
    }

    /// Prelude without comments or surrounding whitespace.
    pub fn selector(&self) -> String {
        strip_comments(&self.prelude).trim().to_string()
    }

    /// `@name` followed by nothing, whitespace or `(`.
    pub fn is_at_rule(&self, name: &str) -> bool {
        let selector = self.selector();
        selector
            .strip_prefix('@')
            .and_then(|rest| rest.strip_prefix(name))
            .is_some_and(|rest| {
                rest.chars()
                    .next()
                    .is_none_or(|c| c.is_whitespace() || c == '(')
            })
    }

    pub fn is_theme(&self) -> bool {
        self.is_at_rule("theme")
    }

    pub fn is_dark_media(&self) -> bool {
        self.is_at_rule("media") && DARK_MEDIA.is_match(&self.prelude)
    }

    pub fn is_light_media(&self) -> bool {
        self.is_at_rule("media") && self.prelude.contains("prefers-color-scheme: light")
    }

    pub fn is_dark_class(&self) -> bool {
        DARK_CLASS.is_match(&self.selector())
    }

    /// Custom properties declared directly in this block, in source order.
    pub fn declarations(&self) -> Vec<Declaration> {
        let mut out = Vec::new();
        for child in &self.children {
            if let Node::Text(text) = child {
                let text = strip_comments(text);
                out.extend(DECLARATION.captures_iter(&text).map(|caps| Declaration {
                    name: caps[1].to_string(),
                    value: caps[2].trim().to_string(),
                }));
            }
        }
        out
    }

    /// Body as source text, without the braces.
    pub fn body(&self) -> String {
        self.children.iter().map(ToString::to_string).collect()
    }

    /// Whether the body holds nothing but whitespace and comments.
    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(text) => strip_comments(text).trim().is_empty(),
            Node::Block(_) => false,
        })
    }
}

// ── Parsing ──────────────────────────────────────────────────────────

impl Stylesheet {
    pub fn parse(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut top: Vec<Node> = Vec::new();
        let mut open: Vec<Block> = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let end = src[i + 2..].find("*/").map_or(src.len(), |p| i + 2 + p + 2);
                    // A comment between statements belongs to the text run,
                    // one inside a prelude stays part of it.
                    if src[start..i].trim().is_empty() {
                        push_text(current(&mut open, &mut top), &src[start..end]);
                        start = end;
                    }
                    i = end;
                }
                quote @ (b'"' | b'\'') => i = skip_string(bytes, i, quote),
                b';' => {
                    push_text(current(&mut open, &mut top), &src[start..=i]);
                    i += 1;
                    start = i;
                }
                b'{' => {
                    let pending = &src[start..i];
                    let prelude = pending.trim_start();
                    let lead = &pending[..pending.len() - prelude.len()];
                    push_text(current(&mut open, &mut top), lead);
                    open.push(Block {
                        prelude: prelude.to_string(),
                        children: Vec::new(),
                        closed: false,
                    });
                    i += 1;
                    start = i;
                }
                b'}' => {
                    push_text(current(&mut open, &mut top), &src[start..i]);
                    match open.pop() {
                        Some(mut block) => {
                            block.closed = true;
                            current(&mut open, &mut top).push(Node::Block(block));
                        }
                        None => push_text(&mut top, "}"),
                    }
                    i += 1;
                    start = i;
                }
                _ => i += 1,
            }
        }

        push_text(current(&mut open, &mut top), &src[start.min(src.len())..]);
        while let Some(block) = open.pop() {
            current(&mut open, &mut top).push(Node::Block(block));
        }

        Self { nodes: top }
    }
}

impl Stylesheet {
    /// Terminate a comment or blocks still open at the end of the source,
    /// so text appended afterwards lands at the top level. Returns whether
    /// anything was closed.
    pub fn close_trailing(&mut self) -> bool {
        close_trailing(&mut self.nodes)
    }
}

fn close_trailing(nodes: &mut [Node]) -> bool {
    match nodes.last_mut() {
        Some(Node::Text(text)) => {
            // `/*/` is an opener, not a closed comment.
            let open_comment = COMMENT
                .find_iter(text)
                .last()
                .is_some_and(|m| m.as_str().len() < 4 || !m.as_str().ends_with("*/"));
            if open_comment {
                text.push_str(" */");
            }
            open_comment
        }
        Some(Node::Block(block)) if !block.closed => {
            close_trailing(&mut block.children);
            block.closed = true;
            true
        }
        _ => false,
    }
}

fn current<'a>(open: &'a mut [Block], top: &'a mut Vec<Node>) -> &'a mut Vec<Node> {
    match open.last_mut() {
        Some(block) => &mut block.children,
        None => top,
    }
}

pub(crate) fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Index just past the closing quote. Strings end at an unescaped newline.
fn skip_string(bytes: &[u8], open: usize, quote: u8) -> usize {
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

fn strip_comments(text: &str) -> String {
    COMMENT.replace_all(text, "").into_owned()
}

// ── Queries ──────────────────────────────────────────────────────────

impl Stylesheet {
    /// Every block, depth first, parents before children.
    pub fn blocks(&self) -> Vec<&Block> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Block>) {
            for node in nodes {
                if let Node::Block(block) = node {
                    out.push(block);
                    walk(&block.children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }

    /// Names (without `--`) of every custom property declared anywhere.
    pub fn declared_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        collect_names(&self.nodes, &mut names);
        names
    }

    /// Names declared inside a `.dark` rule or a dark color-scheme query.
    pub fn dark_declared_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        for block in self.blocks() {
            if block.is_dark_class() || block.is_dark_media() {
                collect_names(&block.children, &mut names);
            }
        }
        names
    }

    pub fn has_dark_class(&self) -> bool {
        self.blocks().iter().any(|block| block.is_dark_class())
    }

    pub fn has_dark_media(&self) -> bool {
        self.blocks().iter().any(|block| block.is_dark_media())
    }

    pub fn has_theme(&self) -> bool {
        self.blocks().iter().any(|block| block.is_theme())
    }

    /// `@import "tailwindcss"` at the top level.
    pub fn has_v4_import(&self) -> bool {
        self.nodes.iter().any(|node| match node {
            Node::Text(text) => V4_IMPORT.is_match(&strip_comments(text)),
            Node::Block(_) => false,
        })
    }

    /// Any Tailwind v4 marker: the bare import or a `@theme` block.
    pub fn has_v4_markers(&self) -> bool {
        self.has_v4_import() || self.has_theme()
    }
}

fn collect_names(nodes: &[Node], names: &mut IndexSet<String>) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                let text = strip_comments(text);
                for caps in PROPERTY_NAME.captures_iter(&text) {
                    names.insert(caps[1].to_string());
                }
            }
            Node::Block(block) => collect_names(&block.children, names),
        }
    }
}

// ── Serialization ────────────────────────────────────────────────────

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => f.write_str(text),
            Node::Block(block) => {
                f.write_str(&block.prelude)?;
                f.write_str("{")?;
                for child in &block.children {
                    write!(f, "{child}")?;
                }
                if block.closed {
                    f.write_str("}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
