// ── Scaffolding templates ──
//
// Static files and choice tables used by `init`.

/// Packages every component relies on.
pub const PROJECT_DEPENDENCIES: [&str; 4] = [
    "tailwindcss-animate",
    "class-variance-authority",
    "clsx",
    "tailwind-merge",
];

pub const STYLES: [&str; 1] = ["default"];

pub const BASE_COLORS: [&str; 22] = [
    "slate", "gray", "zinc", "neutral", "stone", "red", "orange", "amber", "yellow", "lime",
    "green", "emerald", "teal", "cyan", "sky", "blue", "indigo", "violet", "purple", "fuchsia",
    "pink", "rose",
];

/// Content globs a Tailwind config needs for components to get styled.
pub const CONTENT_PATHS: [&str; 2] = ["./src/**/*.{ts,tsx}", "./app/**/*.{ts,tsx}"];

pub const UTILS_TS: &str = r#"import { type ClassValue, clsx } from "clsx"
import { twMerge } from "tailwind-merge"

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs))
}
"#;

pub const UTILS_JS: &str = r#"import { clsx } from "clsx"
import { twMerge } from "tailwind-merge"

export function cn(...inputs) {
  return twMerge(clsx(inputs))
}
"#;

const TAILWIND_CONFIG_BODY: &str = r#"  darkMode: ["class"],
  content: [
    "./pages/**/*.{ts,tsx}",
    "./components/**/*.{ts,tsx}",
    "./app/**/*.{ts,tsx}",
    "./src/**/*.{ts,tsx}",
  ],
  theme: {
    container: {
      center: true,
      padding: "2rem",
      screens: {
        "2xl": "1400px",
      },
    },
    extend: {
      colors: {
        border: "hsl(var(--border))",
        input: "hsl(var(--input))",
        ring: "hsl(var(--ring))",
        background: "hsl(var(--background))",
        foreground: "hsl(var(--foreground))",
        primary: {
          DEFAULT: "hsl(var(--primary))",
          foreground: "hsl(var(--primary-foreground))",
        },
        secondary: {
          DEFAULT: "hsl(var(--secondary))",
          foreground: "hsl(var(--secondary-foreground))",
        },
        destructive: {
          DEFAULT: "hsl(var(--destructive))",
          foreground: "hsl(var(--destructive-foreground))",
        },
        muted: {
          DEFAULT: "hsl(var(--muted))",
          foreground: "hsl(var(--muted-foreground))",
        },
        accent: {
          DEFAULT: "hsl(var(--accent))",
          foreground: "hsl(var(--accent-foreground))",
        },
        popover: {
          DEFAULT: "hsl(var(--popover))",
          foreground: "hsl(var(--popover-foreground))",
        },
        card: {
          DEFAULT: "hsl(var(--card))",
          foreground: "hsl(var(--card-foreground))",
        },
      },
      borderRadius: {
        lg: "var(--radius)",
        md: "calc(var(--radius) - 2px)",
        sm: "calc(var(--radius) - 4px)",
      },
    },
  },
"#;

/// Tailwind config in the project's module flavor.
pub fn tailwind_config(typescript: bool) -> String {
    if typescript {
        format!(
            "import type {{ Config }} from \"tailwindcss\"\n\nconst config = {{\n{TAILWIND_CONFIG_BODY}  plugins: [require(\"tailwindcss-animate\")],\n}} satisfies Config\n\nexport default config\n"
        )
    } else {
        format!(
            "/** @type {{import('tailwindcss').Config}} */\nmodule.exports = {{\n{TAILWIND_CONFIG_BODY}  plugins: [require(\"tailwindcss-animate\")],\n}}\n"
        )
    }
}

pub fn utils_module(typescript: bool) -> &'static str {
    if typescript { UTILS_TS } else { UTILS_JS }
}
