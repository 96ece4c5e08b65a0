use std::collections::BTreeMap;

use serde::Deserialize;

/// Prose variable prefix for the light scope.
pub const PROSE_PREFIX: &str = "--tw-prose";
/// Prose variable prefix for the dark (inverted) scope.
pub const PROSE_INVERT_PREFIX: &str = "--tw-prose-invert";

/// Palette namespace whose variables carry prose text colors.
const CONTENT_NAMESPACE: &str = "content";

/// Alpha applied to content colors when [`TypographyOptions::apply_alpha`] is set.
const CONTENT_ALPHA: &str = "0.95";

/// Prose role -> palette path (relative to the palette prefix) it takes its color from.
pub const PROSE_ROLES: [(&str, &str); 17] = [
    ("body", "content-copy"),
    ("headings", "content-heading"),
    ("lead", "content-lead"),
    ("links", "content-link"),
    ("bold", "content-copy"),
    ("counters", "content-copy"),
    ("bullets", "content-list-bullet"),
    ("hr", "content-divider"),
    ("quotes", "content-heading"),
    ("quote-borders", "content-divider"),
    ("captions", "content-caption"),
    ("kbd", "content-heading"),
    ("code", "content-code"),
    ("pre-code", "content-code"),
    ("pre-bg", "box"),
    ("th-borders", "content-table-th"),
    ("td-borders", "content-table-td"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyOptions {
    /// Soften content colors to 95% opacity.
    pub apply_alpha: bool,
}

impl Default for TypographyOptions {
    fn default() -> Self {
        Self { apply_alpha: true }
    }
}

/// Map palette variables onto the typography plugin's `--tw-prose-*` variables, for both the
/// regular and the inverted scope.
///
/// Content colors become `rgb(var(--P-content-x) / <alpha>)`; anything else (e.g. the `pre`
/// background) becomes `rgb(var(--P-x))`.
pub fn prose_variables(prefix: &str, options: TypographyOptions) -> BTreeMap<String, String> {
    let alpha = if options.apply_alpha {
        CONTENT_ALPHA
    } else {
        "1"
    };

    let mut variables = BTreeMap::new();
    for scope in [PROSE_PREFIX, PROSE_INVERT_PREFIX] {
        for (role, palette_path) in PROSE_ROLES {
            let source = format!("--{prefix}-{palette_path}");
            let value = if palette_path.starts_with(CONTENT_NAMESPACE) {
                format!("rgb(var({source}) / {alpha})")
            } else {
                format!("rgb(var({source}))")
            };
            variables.insert(format!("{scope}-{role}"), value);
        }
    }
    variables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_scopes_cover_every_role() {
        let vars = prose_variables("P", TypographyOptions::default());
        assert_eq!(vars.len(), PROSE_ROLES.len() * 2);
        for (role, _) in PROSE_ROLES {
            assert!(vars.contains_key(&format!("--tw-prose-{role}")));
            assert!(vars.contains_key(&format!("--tw-prose-invert-{role}")));
        }
    }

    #[test]
    fn content_colors_get_alpha() {
        let vars = prose_variables("P", TypographyOptions::default());
        assert_eq!(vars["--tw-prose-body"], "rgb(var(--P-content-copy) / 0.95)");
        assert_eq!(
            vars["--tw-prose-invert-bullets"],
            "rgb(var(--P-content-list-bullet) / 0.95)"
        );
    }

    #[test]
    fn alpha_can_be_disabled() {
        let vars = prose_variables("P", TypographyOptions { apply_alpha: false });
        assert_eq!(vars["--tw-prose-links"], "rgb(var(--P-content-link) / 1)");
    }

    #[test]
    fn non_content_colors_have_no_alpha() {
        for apply_alpha in [true, false] {
            let vars = prose_variables("P", TypographyOptions { apply_alpha });
            assert_eq!(vars["--tw-prose-pre-bg"], "rgb(var(--P-box))");
            assert_eq!(vars["--tw-prose-invert-pre-bg"], "rgb(var(--P-box))");
        }
    }

    #[test]
    fn follows_palette_prefix() {
        let vars = prose_variables("brand", TypographyOptions::default());
        assert_eq!(vars["--tw-prose-hr"], "rgb(var(--brand-content-divider) / 0.95)");
    }
}
