use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ThemeMode;
use crate::config::PaletteOptions;
use crate::error::PaletteErrors;
use crate::typography::prose_variables;
use crate::walker::{ColorConfig, ColorConfigValue, CssVariables};

/// Selector for light-mode (and mode-independent) declarations.
pub const ROOT_SELECTOR: &str = ":root";
/// Selector for dark-mode declarations.
pub const DARK_SELECTOR: &str = ".dark";

/// Everything generated from one palette document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeOutput {
    /// Light palette variables plus prose variables.
    pub root: CssVariables,
    /// Dark palette variables.
    pub dark: CssVariables,
    /// Color extension, keyed by the palette prefix.
    pub colors: ColorConfig,
    /// Prose variables for the typography default style block.
    pub typography: BTreeMap<String, String>,
}

/// JSON shape of the styling framework's theme extension.
#[derive(Serialize)]
struct ThemeExtension<'a> {
    colors: &'a ColorConfig,
    typography: TypographyExtension<'a>,
}

#[derive(Serialize)]
struct TypographyExtension<'a> {
    #[serde(rename = "DEFAULT")]
    default: TypographyBlock<'a>,
}

#[derive(Serialize)]
struct TypographyBlock<'a> {
    css: &'a BTreeMap<String, String>,
}

impl ThemeOutput {
    /// Run every traversal over `options.palette`. Fails without partial output if any
    /// traversal finds an invalid value.
    ///
    /// With `collect_errors` every traversal runs and their errors are merged, one per path.
    /// Otherwise the first failing traversal (color config, light, dark) decides the error.
    pub fn build(options: &PaletteOptions) -> std::result::Result<Self, PaletteErrors> {
        let walker = options.walker();
        let palette = &options.palette;

        let (config, light, dark) = if options.collect_errors {
            match (
                walker.color_config(palette),
                walker.css_variables(palette, ThemeMode::Light),
                walker.css_variables(palette, ThemeMode::Dark),
            ) {
                (Ok(config), Ok(light), Ok(dark)) => (config, light, dark),
                (config, light, dark) => {
                    let errors = [config.err(), light.err(), dark.err()].into_iter().flatten();
                    return Err(PaletteErrors::merge(errors));
                }
            }
        } else {
            (
                walker.color_config(palette)?,
                walker.css_variables(palette, ThemeMode::Light)?,
                walker.css_variables(palette, ThemeMode::Dark)?,
            )
        };
        let typography = prose_variables(&options.prefix, options.typography);

        let mut root = light;
        root.extend(typography.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut colors = ColorConfig::new();
        colors.insert(options.prefix.clone(), ColorConfigValue::Nested(config));

        info!(
            root = root.len(),
            dark = dark.len(),
            prose = typography.len(),
            "built theme palette"
        );

        Ok(Self {
            root,
            dark,
            colors,
            typography,
        })
    }

    /// `:root { ... }` and `.dark { ... }` blocks, one declaration per line.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        write_block(&mut out, ROOT_SELECTOR, &self.root);
        out.push('\n');
        write_block(&mut out, DARK_SELECTOR, &self.dark);
        out
    }

    /// Pretty JSON of the color and typography theme extension.
    pub fn to_json(&self) -> Result<String> {
        let extension = ThemeExtension {
            colors: &self.colors,
            typography: TypographyExtension {
                default: TypographyBlock {
                    css: &self.typography,
                },
            },
        };
        let mut json = serde_json::to_string_pretty(&extension)
            .context("failed to serialize theme extension")?;
        json.push('\n');
        Ok(json)
    }

    /// Write `content` to an arbitrary path.
    pub fn write_to(content: &str, path: &Path) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write theme to {}", path.display()))?;
        Ok(())
    }
}

fn write_block(out: &mut String, selector: &str, declarations: &CssVariables) {
    let _ = writeln!(out, "{selector} {{");
    for (name, value) in declarations {
        let _ = writeln!(out, "  {name}: {value};");
    }
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaletteError;

    fn options(json: &str) -> PaletteOptions {
        PaletteOptions::from_json(json).unwrap()
    }

    #[test]
    fn root_includes_prose_variables() {
        let output = ThemeOutput::build(&options(r##"{"palette": {"box": "#000"}}"##)).unwrap();
        assert_eq!(output.root["--P-box"], "0 0 0");
        assert_eq!(output.root["--tw-prose-pre-bg"], "rgb(var(--P-box))");
        assert!(!output.dark.contains_key("--tw-prose-pre-bg"));
        assert_eq!(output.dark["--P-box"], "0 0 0");
    }

    #[test]
    fn colors_nest_under_prefix() {
        let output =
            ThemeOutput::build(&options(r##"{"prefix": "Q", "palette": {"a": "#fff"}}"##)).unwrap();
        let nested = output.colors["Q"].as_nested().unwrap();
        assert_eq!(
            nested["a"].as_expression(),
            Some("rgb(var(--Q-a) / <alpha-value>)")
        );
    }

    #[test]
    fn css_blocks() {
        let output = ThemeOutput::build(&options(
            r##"{"typography": {"applyAlpha": false}, "palette": {"fg": ["#fff", "#000"]}}"##,
        ))
        .unwrap();
        let css = output.to_css();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --P-fg: 255 255 255;\n"));
        assert!(css.contains("\n.dark {\n  --P-fg: 0 0 0;\n}\n"));
        assert!(css.contains("  --tw-prose-body: rgb(var(--P-content-copy) / 1);\n"));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn json_extension_shape() {
        let output = ThemeOutput::build(&options(r##"{"palette": {"a": "#fff"}}"##)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(
            json["colors"]["P"]["a"],
            "rgb(var(--P-a) / <alpha-value>)"
        );
        assert_eq!(
            json["typography"]["DEFAULT"]["css"]["--tw-prose-invert-body"],
            "rgb(var(--P-content-copy) / 0.95)"
        );
    }

    #[test]
    fn invalid_palette_produces_no_output() {
        let err = ThemeOutput::build(&options(r#"{"palette": {"a": []}}"#)).unwrap_err();
        assert_eq!(err.first().path(), "a");
    }

    #[test]
    fn collect_errors_reports_every_traversal() {
        let err = ThemeOutput::build(&options(
            r##"{"collectErrors": true, "palette": {"a": ["#000", "#111", "#222"], "b": null, "c": {"d": false}}}"##,
        ))
        .unwrap_err();
        let paths: Vec<&str> = err.iter().map(PaletteError::path).collect();
        assert_eq!(paths, ["a", "b", "c.d"]);
        assert!(matches!(err.first(), PaletteError::InvalidPaletteValue { len: 3, .. }));
    }

    #[test]
    fn fail_fast_reports_one_error() {
        let err = ThemeOutput::build(&options(
            r##"{"palette": {"a": ["#000", "#111", "#222"], "b": null}}"##,
        ))
        .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn write_to_creates_file() {
        let dir = std::env::temp_dir().join("tailpal-test-theme-write");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("theme.css");

        ThemeOutput::write_to(":root {\n}\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ":root {\n}\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
