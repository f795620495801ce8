// ── Import alias rewriting ──
//
// Registry sources import through the canonical `@/lib/utils` and
// `@/components/...` aliases. Each occurrence is rewritten to the project's
// configured alias in a single pass, so replaced text is never rewritten
// again.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use sickui_config::Aliases;

// Alternation is leftmost-first: the more specific component alias wins
// over the generic prefix.
static CANONICAL_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@/lib/utils|@/components/ui|@/components/")
        .expect("CANONICAL_ALIAS: invalid regex pattern")
});

/// Rewrite canonical import aliases in `raw` to the project's aliases.
///
/// A match already followed by its replacement is kept as is, so aliases
/// nested under a canonical prefix (`@/components/shadcn`) are not
/// rewritten twice.
pub fn transform(raw: &str, aliases: &Aliases) -> String {
    let components = aliases.components.trim_end_matches('/');
    CANONICAL_ALIAS
        .replace_all(raw, |caps: &Captures<'_>| {
            let found = &caps[0];
            let target = match found {
                "@/lib/utils" => aliases.utils.clone(),
                "@/components/ui" => format!("{components}/ui"),
                _ => format!("{components}/"),
            };
            let start = caps.get(0).map_or(0, |m| m.start());
            if raw[start..].starts_with(&target) {
                found.to_string()
            } else {
                target
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn aliases(utils: &str, components: &str) -> Aliases {
        Aliases {
            utils: utils.into(),
            components: components.into(),
        }
    }

    const BUTTON: &str = r#"import * as React from "react"
import { Slot } from "@/components/ui/slot"
import { cn } from "@/lib/utils"
import { Icon } from "@/components/icons/spinner"
"#;

    #[test]
    fn rewrites_utils_alias() {
        let out = transform(
            r#"import { cn } from "@/lib/utils""#,
            &aliases("@/utils", "@/components"),
        );
        assert_eq!(out, r#"import { cn } from "@/utils""#);
    }

    #[test]
    fn rewrites_every_alias_once() {
        let out = transform(BUTTON, &aliases("~/lib/cn", "~/ui-kit"));
        assert_snapshot!(out, @r#"
        import * as React from "react"
        import { Slot } from "~/ui-kit/ui/slot"
        import { cn } from "~/lib/cn"
        import { Icon } from "~/ui-kit/icons/spinner"
        "#);
    }

    #[test]
    fn target_aliases_are_left_alone() {
        let project = aliases("@/lib/utils", "@/components");
        assert_eq!(transform(BUTTON, &project), BUTTON);

        let custom = aliases("@/utils", "~/components");
        let once = transform(BUTTON, &custom);
        assert_eq!(transform(&once, &custom), once);
    }

    #[test]
    fn aliases_nested_under_canonical_prefixes_are_rewritten_once() {
        let project = aliases("@/lib/utils/cn", "@/components/shadcn");
        let once = transform(BUTTON, &project);
        assert_snapshot!(once, @r#"
        import * as React from "react"
        import { Slot } from "@/components/shadcn/ui/slot"
        import { cn } from "@/lib/utils/cn"
        import { Icon } from "@/components/shadcn/icons/spinner"
        "#);
        assert_eq!(transform(&once, &project), once);

        let rewritten = r#"import { Button } from "@/components/shadcn/ui/button""#;
        assert_eq!(transform(rewritten, &project), rewritten);
    }

    #[test]
    fn trailing_slash_in_alias_is_tolerated() {
        let out = transform(r#"from "@/components/ui/card""#, &aliases("@/utils", "src/widgets/"));
        assert_eq!(out, r#"from "src/widgets/ui/card""#);
    }

    #[test]
    fn source_without_aliases_is_unchanged() {
        let src = "export const answer = 42\n";
        assert_eq!(transform(src, &aliases("@/utils", "@/c")), src);
    }
}
