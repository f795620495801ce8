// ── Design-token catalog ──
//
// The custom properties every component expects, with their light and dark
// HSL channel values. Order is significant: patches list tokens in this order.

/// One required design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Name without the leading `--`.
    pub name: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

impl Token {
    /// `--name`, as declared in a v3 stylesheet.
    pub fn property(&self) -> String {
        format!("--{}", self.name)
    }

    /// The v4 theme namespace form. `radius` is not a color and stays bare.
    pub fn v4_property(&self) -> String {
        if self.is_radius() {
            self.property()
        } else {
            format!("--color-{}", self.name)
        }
    }

    /// Value for the given color scheme.
    pub fn value(&self, dark: bool) -> &'static str {
        if dark { self.dark } else { self.light }
    }

    /// `radius` has no dark variant and never goes into a dark block.
    pub fn is_radius(&self) -> bool {
        self.name == "radius"
    }
}

const fn token(name: &'static str, light: &'static str, dark: &'static str) -> Token {
    Token { name, light, dark }
}

pub static CATALOG: [Token; 20] = [
    token("background", "0 0% 100%", "0 0% 2.4%"),
    token("foreground", "222.2 84% 4.9%", "210 40% 98%"),
    token("primary", "221.2 83.2% 53.3%", "217.2 91.2% 59.8%"),
    token("primary-foreground", "210 40% 98%", "0 0% 2.4%"),
    token("secondary", "210 40% 96%", "0 0% 8%"),
    token("secondary-foreground", "222.2 84% 4.9%", "210 40% 98%"),
    token("muted", "210 40% 96%", "0 0% 8%"),
    token("muted-foreground", "215.4 16.3% 46.9%", "215 20.2% 65.1%"),
    token("accent", "210 40% 96%", "0 0% 8%"),
    token("accent-foreground", "222.2 84% 4.9%", "210 40% 98%"),
    token("destructive", "0 84.2% 60.2%", "0 62.8% 30.6%"),
    token("destructive-foreground", "210 40% 98%", "210 40% 98%"),
    token("border", "214.3 31.8% 91.4%", "0 0% 8%"),
    token("input", "214.3 31.8% 91.4%", "0 0% 8%"),
    token("ring", "221.2 83.2% 53.3%", "224.3 76.3% 94.1%"),
    token("card", "0 0% 100%", "0 0% 2.4%"),
    token("card-foreground", "222.2 84% 4.9%", "210 40% 98%"),
    token("popover", "0 0% 100%", "0 0% 2.4%"),
    token("popover-foreground", "222.2 84% 4.9%", "210 40% 98%"),
    token("radius", "0.5rem", "0.5rem"),
];

/// Look a token up by bare name (`"primary"`) or property (`"--primary"`).
pub fn lookup(name: &str) -> Option<&'static Token> {
    let bare = name.strip_prefix("--").unwrap_or(name);
    CATALOG.iter().find(|token| token.name == bare)
}
