use anyhow::{bail, Result};
use palette::{FromColor, Hsl, IntoColor, Srgb};

/// An opaque sRGB color used to author palette values.
///
/// Palette definitions are written with hex scales and derived shades (`lighten`, `darken`); the
/// walker only ever sees the strings these produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `FF8800` or the shorthand `#f80`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid hex color: {hex:?} contains non-hex characters");
        }
        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            n => bail!("invalid hex color: expected 3 or 6 hex digits, got {n}"),
        };
        let r = u8::from_str_radix(&expanded[0..2], 16)?;
        let g = u8::from_str_radix(&expanded[2..4], 16)?;
        let b = u8::from_str_radix(&expanded[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// CSS hex notation only: a leading `#` is mandatory.
    pub(crate) fn from_css_hex(input: &str) -> Option<Self> {
        if !input.starts_with('#') {
            return None;
        }
        Self::from_hex(input).ok()
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Legacy functional notation, `rgb(14, 165, 233)`.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    fn to_hsl(self) -> Hsl {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    fn from_hsl(hsl: Hsl) -> Self {
        let srgb: Srgb<f32> = Srgb::from_color(hsl);
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    /// Raise HSL lightness by `amount` (0 = unchanged, 1 = white). Lightness is clamped to [0, 1].
    pub fn lighten(self, amount: f32) -> Color {
        let mut hsl = self.to_hsl();
        hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
        Color::from_hsl(hsl)
    }

    /// Lower HSL lightness by `amount` (0 = unchanged, 1 = black).
    pub fn darken(self, amount: f32) -> Color {
        self.lighten(-amount)
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG 2.0 contrast ratio between two colors, in [1, 21].
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
