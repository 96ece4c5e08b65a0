use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::token::ThemeTokenTree;
use crate::typography::TypographyOptions;
use crate::walker::{ErrorPolicy, ModePairPolicy, PaletteWalker};

pub const DEFAULT_PREFIX: &str = "P";

/// A palette document: the token tree plus the options that control how it is walked.
///
/// ```json
/// {
///   "prefix": "P",
///   "typography": { "applyAlpha": true },
///   "strictModePairs": false,
///   "palette": { "primary": { "DEFAULT": "#0ea5e9", "fg": ["#fff", "#000"] } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteOptions {
    pub prefix: String,
    pub typography: TypographyOptions,
    pub strict_mode_pairs: bool,
    pub collect_errors: bool,
    pub palette: ThemeTokenTree,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            typography: TypographyOptions::default(),
            strict_mode_pairs: false,
            collect_errors: false,
            palette: ThemeTokenTree::new(),
        }
    }
}

impl PaletteOptions {
    pub fn with_palette(palette: ThemeTokenTree) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// A walker configured by these options.
    pub fn walker(&self) -> PaletteWalker {
        PaletteWalker::new(self.prefix.as_str())
            .error_policy(if self.collect_errors {
                ErrorPolicy::CollectAll
            } else {
                ErrorPolicy::FailFast
            })
            .mode_pair_policy(if self.strict_mode_pairs {
                ModePairPolicy::Strict
            } else {
                ModePairPolicy::LightDecides
            })
    }
}
