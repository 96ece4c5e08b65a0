use std::fmt;

use thiserror::Error;

/// A fatal problem found while walking a theme token tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// A light/dark pair that is not a 1- or 2-element array.
    #[error(
        "invalid palette value at `{path}`: expected 1 or 2 values (light, dark), got {len}: {value}"
    )]
    InvalidPaletteValue {
        path: String,
        len: usize,
        value: String,
    },

    /// A leaf that cannot become a color expression (null, boolean, number, empty string or
    /// empty subtree).
    #[error("invalid color value at `{path}`: {value}")]
    InvalidColorValue { path: String, value: String },

    /// Light and dark values that disagree on format or alpha (strict mode-pair policy only).
    #[error("inconsistent light/dark pair at `{path}`: `{light}` and `{dark}` differ in format or alpha")]
    InconsistentModePair {
        path: String,
        light: String,
        dark: String,
    },
}

impl PaletteError {
    /// Dotted key path of the offending token.
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPaletteValue { path, .. }
            | Self::InvalidColorValue { path, .. }
            | Self::InconsistentModePair { path, .. } => path,
        }
    }
}

/// Every error collected by one traversal. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteErrors(Vec<PaletteError>);

impl PaletteErrors {
    pub(crate) fn new(errors: Vec<PaletteError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn first(&self) -> &PaletteError {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteError> {
        self.0.iter()
    }

    /// Concatenate several error sets, keeping the first error reported for each path.
    pub(crate) fn merge(sets: impl IntoIterator<Item = PaletteErrors>) -> Self {
        let mut errors: Vec<PaletteError> = Vec::new();
        for error in sets.into_iter().flat_map(|set| set.0) {
            if !errors.iter().any(|seen| seen.path() == error.path()) {
                errors.push(error);
            }
        }
        Self::new(errors)
    }
}

impl From<PaletteError> for PaletteErrors {
    fn from(error: PaletteError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for PaletteErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.0.as_slice() {
            return write!(f, "{only}");
        }
        write!(f, "{} invalid palette values:", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PaletteErrors {}

/// Errors raised while loading a palette options document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid palette document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaletteErrors>;
