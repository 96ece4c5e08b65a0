use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::cli::ThemeMode;
use crate::color::Color;

/// Key that names the current path itself instead of adding a segment to it.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// A nested, author-facing description of theme colors.
pub type ThemeTokenTree = BTreeMap<String, TokenValue>;

/// One node of a [`ThemeTokenTree`].
///
/// Deserializes from JSON as: string -> `Scalar`, array of strings -> `ModePair`, object ->
/// `Subtree`. Anything else is kept as `Invalid` so a walk can report where it sits. An array
/// with non-string slots (`["#fff", null]`) is `Invalid` but still acts as a pair: its string
/// slots are picked per mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Same color in both modes.
    Scalar(String),
    /// `[both]` or `[light, dark]`. Other lengths are rejected by the walker.
    ModePair(Vec<String>),
    Subtree(ThemeTokenTree),
    Invalid(serde_json::Value),
}

impl TokenValue {
    pub fn scalar(color: impl Into<String>) -> Self {
        Self::Scalar(color.into())
    }

    pub fn pair(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self::ModePair(vec![light.into(), dark.into()])
    }

    /// Build a subtree from `(key, value)` entries.
    pub fn subtree<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TokenValue)>,
    {
        Self::Subtree(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Number of slots of an array-shaped leaf, whatever the slots hold.
    pub fn pair_len(&self) -> Option<usize> {
        match self {
            Self::ModePair(values) => Some(values.len()),
            Self::Invalid(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    fn slot(&self, index: usize) -> Option<&str> {
        match self {
            Self::ModePair(values) => values.get(index).map(String::as_str),
            Self::Invalid(Value::Array(items)) => items.get(index).and_then(Value::as_str),
            _ => None,
        }
    }

    /// Select the color for `mode`.
    ///
    /// A 1-element pair yields its value in both modes. Returns `None` for subtrees, non-array
    /// invalid leaves, empty scalars, pairs whose length is not 1 or 2 and pairs whose selected
    /// slot is not a non-empty string.
    pub fn pick(&self, mode: ThemeMode) -> Option<&str> {
        let picked = match self {
            Self::Scalar(color) => color.as_str(),
            _ => {
                let len = self.pair_len().filter(|&len| matches!(len, 1 | 2))?;
                let index = match mode {
                    ThemeMode::Light => 0,
                    ThemeMode::Dark => 1.min(len - 1),
                };
                self.slot(index)?
            }
        };
        (!picked.is_empty()).then_some(picked)
    }

    /// Short rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(color) if color.is_empty() => "empty string".to_string(),
            Self::Scalar(color) => format!("{color:?}"),
            Self::ModePair(values) => format!("{values:?}"),
            Self::Subtree(tree) if tree.is_empty() => "empty subtree".to_string(),
            Self::Subtree(_) => "subtree".to_string(),
            Self::Invalid(value) => value.to_string(),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(color: &str) -> Self {
        Self::scalar(color)
    }
}

impl From<String> for TokenValue {
    fn from(color: String) -> Self {
        Self::Scalar(color)
    }
}

impl From<Color> for TokenValue {
    fn from(color: Color) -> Self {
        Self::Scalar(color.to_hex())
    }
}

impl From<[Color; 2]> for TokenValue {
    fn from([light, dark]: [Color; 2]) -> Self {
        Self::pair(light.to_hex(), dark.to_hex())
    }
}

impl From<[&str; 2]> for TokenValue {
    fn from([light, dark]: [&str; 2]) -> Self {
        Self::pair(light, dark)
    }
}

/// Location of a node during a walk.
///
/// `keys` is every key on the way down (used to report errors); `segments` drops `DEFAULT`
/// keys and is what variable names are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPath {
    keys: Vec<String>,
    segments: Vec<String>,
}

impl TokenPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// The path of the child stored under `key`.
    pub fn child(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.keys.push(key.to_string());
        if key != DEFAULT_KEY {
            next.segments.push(key.to_string());
        }
        next
    }

    /// `--<prefix>` followed by `-<segment>` for every naming segment.
    pub fn variable_name(&self, prefix: &str) -> String {
        let mut name = format!("--{prefix}");
        for segment in &self.segments {
            name.push('-');
            name.push_str(segment);
        }
        name
    }

    /// Dotted key path, `DEFAULT` keys included, e.g. `primary.DEFAULT`.
    pub fn dotted(&self) -> String {
        self.keys.join(".")
    }
}
