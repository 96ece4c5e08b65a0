use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::channels::channel_values;
use crate::cli::ThemeMode;
use crate::detect::{ColorDescriptor, ColorFormat};
use crate::error::{PaletteError, PaletteErrors, Result};
use crate::token::{ThemeTokenTree, TokenPath, TokenValue};

/// Token the styling framework replaces with the opacity requested at the use site.
pub const ALPHA_PLACEHOLDER: &str = "<alpha-value>";

/// Flat `--name -> channel value` declarations for one mode.
pub type CssVariables = BTreeMap<String, String>;

/// Framework color configuration, shaped like the token tree it came from.
pub type ColorConfig = BTreeMap<String, ColorConfigValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorConfigValue {
    /// A functional color expression such as `rgb(var(--P-primary) / <alpha-value>)`.
    Expression(String),
    Nested(ColorConfig),
}

impl ColorConfigValue {
    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Self::Expression(expr) => Some(expr),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&ColorConfig> {
        match self {
            Self::Nested(config) => Some(config),
            Self::Expression(_) => None,
        }
    }
}

/// What a walk does when it meets an invalid value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first invalid value.
    #[default]
    FailFast,
    /// Keep walking and report every invalid value at once.
    CollectAll,
}

/// How the color config treats `[light, dark]` pairs whose values disagree on format or alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModePairPolicy {
    /// The light value picks the wrapper; a differing dark value is logged and ignored.
    #[default]
    LightDecides,
    /// A differing dark value is an [`PaletteError::InconsistentModePair`].
    Strict,
}

/// Recursive walker over a [`ThemeTokenTree`].
#[derive(Debug, Clone)]
pub struct PaletteWalker {
    prefix: String,
    errors: ErrorPolicy,
    pairs: ModePairPolicy,
}

/// Signals a fail-fast walk to unwind.
struct Halt;

struct Diagnostics {
    policy: ErrorPolicy,
    errors: Vec<PaletteError>,
}

impl Diagnostics {
    fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            errors: Vec::new(),
        }
    }

    fn report(&mut self, error: PaletteError) -> std::result::Result<(), Halt> {
        debug!(path = error.path(), %error, "invalid palette value");
        self.errors.push(error);
        match self.policy {
            ErrorPolicy::FailFast => Err(Halt),
            ErrorPolicy::CollectAll => Ok(()),
        }
    }

    fn finish<T>(self, output: T) -> Result<T> {
        if self.errors.is_empty() {
            Ok(output)
        } else {
            Err(PaletteErrors::new(self.errors))
        }
    }
}

impl PaletteWalker {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            errors: ErrorPolicy::default(),
            pairs: ModePairPolicy::default(),
        }
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.errors = policy;
        self
    }

    pub fn mode_pair_policy(mut self, policy: ModePairPolicy) -> Self {
        self.pairs = policy;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Custom property declarations for `mode`.
    ///
    /// Subtrees recurse, pairs pick their value for the mode, scalars apply to both modes. Empty
    /// or non-color leaves are skipped; pairs of the wrong length are errors.
    pub fn css_variables(&self, tree: &ThemeTokenTree, mode: ThemeMode) -> Result<CssVariables> {
        let mut diagnostics = Diagnostics::new(self.errors);
        let mut variables = CssVariables::new();
        // A halt leaves the error recorded; finish() turns it into Err.
        let _ = self.css_node(tree, &TokenPath::root(), mode, &mut variables, &mut diagnostics);
        debug!(?mode, count = variables.len(), "generated palette css variables");
        diagnostics.finish(variables)
    }

    fn css_node(
        &self,
        tree: &ThemeTokenTree,
        path: &TokenPath,
        mode: ThemeMode,
        out: &mut CssVariables,
        diagnostics: &mut Diagnostics,
    ) -> std::result::Result<(), Halt> {
        for (key, value) in tree {
            let path = path.child(key);

            if let TokenValue::Subtree(subtree) = value {
                self.css_node(subtree, &path, mode, out, diagnostics)?;
                continue;
            }

            if let Some(len) = value.pair_len().filter(|&len| !matches!(len, 1 | 2)) {
                diagnostics.report(PaletteError::InvalidPaletteValue {
                    path: path.dotted(),
                    len,
                    value: value.describe(),
                })?;
                continue;
            }

            match value.pick(mode) {
                Some(color) => {
                    let name = path.variable_name(&self.prefix);
                    let channels = channel_values(color);
                    trace!(%name, %channels, "css variable");
                    out.insert(name, channels);
                }
                None => {
                    warn!(path = %path.dotted(), value = %value.describe(), "skipping non-color palette value");
                }
            }
        }
        Ok(())
    }

    /// Framework color configuration mirroring `tree`, every leaf replaced by a functional color
    /// expression referencing its custom property.
    pub fn color_config(&self, tree: &ThemeTokenTree) -> Result<ColorConfig> {
        let mut diagnostics = Diagnostics::new(self.errors);
        let mut config = ColorConfig::new();
        let _ = self.config_node(tree, &TokenPath::root(), &mut config, &mut diagnostics);
        debug!(keys = config.len(), "generated palette color config");
        diagnostics.finish(config)
    }

    fn config_node(
        &self,
        tree: &ThemeTokenTree,
        path: &TokenPath,
        out: &mut ColorConfig,
        diagnostics: &mut Diagnostics,
    ) -> std::result::Result<(), Halt> {
        for (key, value) in tree {
            let path = path.child(key);

            match value {
                TokenValue::Subtree(subtree) if !subtree.is_empty() => {
                    let mut nested = ColorConfig::new();
                    self.config_node(subtree, &path, &mut nested, diagnostics)?;
                    out.insert(key.clone(), ColorConfigValue::Nested(nested));
                    continue;
                }
                _ => {}
            }

            if let Some(len) = value.pair_len().filter(|&len| !matches!(len, 1 | 2)) {
                diagnostics.report(PaletteError::InvalidPaletteValue {
                    path: path.dotted(),
                    len,
                    value: value.describe(),
                })?;
                continue;
            }

            let Some(light) = value.pick(ThemeMode::Light) else {
                diagnostics.report(PaletteError::InvalidColorValue {
                    path: path.dotted(),
                    value: value.describe(),
                })?;
                continue;
            };

            let descriptor = ColorDescriptor::detect(light);
            if value.pair_len() == Some(2) {
                if let Some(dark) = value.pick(ThemeMode::Dark) {
                    self.check_pair(&path, &descriptor, dark, diagnostics)?;
                }
            }

            let name = path.variable_name(&self.prefix);
            let expression = functional_expression(&descriptor, &name);
            trace!(%name, %expression, "color config entry");
            out.insert(key.clone(), ColorConfigValue::Expression(expression));
        }
        Ok(())
    }

    fn check_pair(
        &self,
        path: &TokenPath,
        light: &ColorDescriptor,
        dark: &str,
        diagnostics: &mut Diagnostics,
    ) -> std::result::Result<(), Halt> {
        let dark = ColorDescriptor::detect(dark);
        if wrapper(light) == wrapper(&dark) && light.alpha == dark.alpha {
            return Ok(());
        }
        match self.pairs {
            ModePairPolicy::Strict => diagnostics.report(PaletteError::InconsistentModePair {
                path: path.dotted(),
                light: light.source().to_string(),
                dark: dark.source().to_string(),
            }),
            ModePairPolicy::LightDecides => {
                warn!(
                    path = %path.dotted(),
                    light = light.source(),
                    dark = dark.source(),
                    "dark value differs in format or alpha; using the light value for the color config"
                );
                Ok(())
            }
        }
    }
}

/// Color function wrapping a detected value, if any.
fn wrapper(descriptor: &ColorDescriptor) -> Option<&'static str> {
    match descriptor.format {
        ColorFormat::Hex | ColorFormat::Rgb => Some("rgb"),
        ColorFormat::Hsl => Some("hsl"),
        ColorFormat::Transparent | ColorFormat::Raw => None,
    }
}

/// `rgb(var(--x) / <alpha-value>)`, `hsl(var(--x) / 0.4)` or plain `var(--x)`.
///
/// An alpha baked into the source value replaces the placeholder, so opacity modifiers have no
/// effect on that token.
pub fn functional_expression(descriptor: &ColorDescriptor, name: &str) -> String {
    match wrapper(descriptor) {
        Some(function) => {
            let alpha = descriptor.alpha.as_deref().unwrap_or(ALPHA_PLACEHOLDER);
            format!("{function}(var({name}) / {alpha})")
        }
        None => format!("var({name})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> ThemeTokenTree {
        serde_json::from_str(json).unwrap()
    }

    fn expr<'a>(config: &'a ColorConfig, keys: &[&str]) -> &'a str {
        let (last, parents) = keys.split_last().unwrap();
        let mut node = config;
        for key in parents {
            node = node[*key].as_nested().unwrap();
        }
        node[*last].as_expression().unwrap()
    }

    #[test]
    fn scalar_is_same_in_both_modes() {
        let t = tree(r##"{"accent": "#ff00ff"}"##);
        let walker = PaletteWalker::new("P");
        let light = walker.css_variables(&t, ThemeMode::Light).unwrap();
        let dark = walker.css_variables(&t, ThemeMode::Dark).unwrap();
        assert_eq!(light["--P-accent"], "255 0 255");
        assert_eq!(light, dark);
    }

    #[test]
    fn pair_selects_index_by_mode() {
        let t = tree(r##"{"fg": ["#fff", "#000"], "one": ["#f00"]}"##);
        let walker = PaletteWalker::new("P");
        let light = walker.css_variables(&t, ThemeMode::Light).unwrap();
        let dark = walker.css_variables(&t, ThemeMode::Dark).unwrap();
        assert_eq!(light["--P-fg"], "255 255 255");
        assert_eq!(dark["--P-fg"], "0 0 0");
        assert_eq!(light["--P-one"], "255 0 0");
        assert_eq!(dark["--P-one"], "255 0 0");
    }

    #[test]
    fn default_never_appends_a_segment() {
        let t = tree(r##"{"a": {"DEFAULT": "#fff", "b": "#000"}}"##);
        let vars = PaletteWalker::new("P")
            .css_variables(&t, ThemeMode::Light)
            .unwrap();
        let names: Vec<&str> = vars.keys().map(String::as_str).collect();
        assert_eq!(names, ["--P-a", "--P-a-b"]);
    }

    #[test]
    fn default_subtree_collapses_too() {
        let t = tree(r##"{"a": {"DEFAULT": {"DEFAULT": "#fff", "x": "#000"}}}"##);
        let vars = PaletteWalker::new("P")
            .css_variables(&t, ThemeMode::Light)
            .unwrap();
        assert!(vars.contains_key("--P-a"));
        assert!(vars.contains_key("--P-a-x"));
        assert!(!vars.keys().any(|k| k.contains("DEFAULT")));
    }

    #[test]
    fn css_walk_skips_empty_leaves() {
        let t = tree(r##"{"a": null, "b": "", "c": "#000", "d": {}}"##);
        let vars = PaletteWalker::new("P")
            .css_variables(&t, ThemeMode::Dark)
            .unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["--P-c"], "0 0 0");
    }

    #[test]
    fn css_walk_rejects_bad_pair_lengths() {
        let t = tree(r##"{"x": {"y": ["#000", "#111", "#222"]}}"##);
        let err = PaletteWalker::new("P")
            .css_variables(&t, ThemeMode::Light)
            .unwrap_err();
        assert_eq!(
            *err.first(),
            PaletteError::InvalidPaletteValue {
                path: "x.y".to_string(),
                len: 3,
                value: r##"["#000", "#111", "#222"]"##.to_string(),
            }
        );
    }

    #[test]
    fn pair_with_a_missing_slot_keeps_the_other_mode() {
        let t = tree(r##"{"x": ["#fff", null]}"##);
        let walker = PaletteWalker::new("P");
        let light = walker.css_variables(&t, ThemeMode::Light).unwrap();
        assert_eq!(light["--P-x"], "255 255 255");
        let dark = walker.css_variables(&t, ThemeMode::Dark).unwrap();
        assert!(dark.is_empty());

        let config = walker
            .mode_pair_policy(ModePairPolicy::Strict)
            .color_config(&t)
            .unwrap();
        assert_eq!(expr(&config, &["x"]), "rgb(var(--P-x) / <alpha-value>)");
    }

    #[test]
    fn missing_light_slot_is_invalid_in_config() {
        let err = PaletteWalker::new("P")
            .color_config(&tree(r##"{"x": [null, "#000"]}"##))
            .unwrap_err();
        assert!(matches!(
            err.first(),
            PaletteError::InvalidColorValue { path, value } if path == "x" && value == r##"[null,"#000"]"##
        ));
    }

    #[test]
    fn raw_values_pass_through() {
        let t = tree(r##"{"custom": "var(--custom)"}"##);
        let walker = PaletteWalker::new("P");
        let vars = walker.css_variables(&t, ThemeMode::Light).unwrap();
        assert_eq!(vars["--P-custom"], "var(--custom)");
        let config = walker.color_config(&t).unwrap();
        assert_eq!(expr(&config, &["custom"]), "var(--P-custom)");
    }

    #[test]
    fn config_mirrors_tree_and_keeps_default_keys() {
        let t = tree(r##"{"primary": {"DEFAULT": "#0ea5e9", "fg": ["#fff", "#000"]}}"##);
        let config = PaletteWalker::new("P").color_config(&t).unwrap();
        assert_eq!(
            expr(&config, &["primary", "DEFAULT"]),
            "rgb(var(--P-primary) / <alpha-value>)"
        );
        assert_eq!(
            expr(&config, &["primary", "fg"]),
            "rgb(var(--P-primary-fg) / <alpha-value>)"
        );
    }

    #[test]
    fn config_bakes_in_source_alpha() {
        let t = tree(
            r##"{
                "scrim": "rgb(200 10 10 / 0.4)",
                "tint": "hsl(50 80% 40% / 25%)",
                "glow": "hsl(0.3turn 60% 45%)",
                "none": "transparent"
            }"##,
        );
        let config = PaletteWalker::new("P").color_config(&t).unwrap();
        assert_eq!(expr(&config, &["scrim"]), "rgb(var(--P-scrim) / 0.4)");
        assert_eq!(expr(&config, &["tint"]), "hsl(var(--P-tint) / 25%)");
        assert_eq!(expr(&config, &["glow"]), "hsl(var(--P-glow) / <alpha-value>)");
        assert_eq!(expr(&config, &["none"]), "var(--P-none)");
    }

    #[test]
    fn config_rejects_falsy_leaves() {
        for json in [
            r#"{"a": null}"#,
            r#"{"a": ""}"#,
            r#"{"a": false}"#,
            r#"{"a": 0}"#,
            r#"{"a": {}}"#,
        ] {
            let err = PaletteWalker::new("P").color_config(&tree(json)).unwrap_err();
            assert!(
                matches!(err.first(), PaletteError::InvalidColorValue { path, .. } if path == "a"),
                "{json}: {err}"
            );
        }
    }

    #[test]
    fn config_rejects_bad_pair_lengths() {
        for json in [r#"{"a": []}"#, r##"{"a": ["#000", "#111", "#222"]}"##] {
            let err = PaletteWalker::new("P").color_config(&tree(json)).unwrap_err();
            assert!(
                matches!(err.first(), PaletteError::InvalidPaletteValue { .. }),
                "{json}: {err}"
            );
        }
    }

    #[test]
    fn collect_all_reports_every_path() {
        let t = tree(r##"{"a": null, "b": {"c": [], "d": "#fff"}, "e": ["1", "2", "3"]}"##);
        let err = PaletteWalker::new("P")
            .error_policy(ErrorPolicy::CollectAll)
            .color_config(&t)
            .unwrap_err();
        let paths: Vec<&str> = err.iter().map(PaletteError::path).collect();
        assert_eq!(paths, ["a", "b.c", "e"]);
    }

    #[test]
    fn fail_fast_reports_one() {
        let t = tree(r#"{"a": null, "b": null}"#);
        let err = PaletteWalker::new("P").color_config(&t).unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn differing_dark_alpha_is_ignored_by_default() {
        let t = tree(r#"{"veil": ["rgb(0 0 0 / 0.2)", "rgb(0 0 0 / 0.6)"]}"#);
        let config = PaletteWalker::new("P").color_config(&t).unwrap();
        assert_eq!(expr(&config, &["veil"]), "rgb(var(--P-veil) / 0.2)");
    }

    #[test]
    fn differing_dark_alpha_fails_when_strict() {
        let t = tree(r#"{"veil": ["rgb(0 0 0 / 0.2)", "rgb(0 0 0 / 0.6)"]}"#);
        let err = PaletteWalker::new("P")
            .mode_pair_policy(ModePairPolicy::Strict)
            .color_config(&t)
            .unwrap_err();
        assert!(matches!(
            err.first(),
            PaletteError::InconsistentModePair { path, .. } if path == "veil"
        ));
    }

    #[test]
    fn hex_and_rgb_pair_is_consistent_when_strict() {
        let t = tree(r##"{"fg": ["#fff", "rgb(10, 20, 30)"]}"##);
        let config = PaletteWalker::new("P")
            .mode_pair_policy(ModePairPolicy::Strict)
            .color_config(&t)
            .unwrap();
        assert_eq!(expr(&config, &["fg"]), "rgb(var(--P-fg) / <alpha-value>)");
    }

    #[test]
    fn prefix_is_configurable() {
        let t = tree(r##"{"a": "#000"}"##);
        let walker = PaletteWalker::new("theme");
        let vars = walker.css_variables(&t, ThemeMode::Light).unwrap();
        assert!(vars.contains_key("--theme-a"));
        let config = walker.color_config(&t).unwrap();
        assert_eq!(expr(&config, &["a"]), "rgb(var(--theme-a) / <alpha-value>)");
    }
}
