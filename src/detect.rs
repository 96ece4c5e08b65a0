use std::sync::LazyLock;

use palette::{FromColor, Hsl, Srgb};
use regex::Regex;

use crate::color::Color;

/// Channel values with or without an `rgb()`/`rgba()` wrapper, comma or space separated, with an
/// optional alpha introduced by `/` or `,`. Alpha keeps its `%` sign.
///
/// Matches `0 0 0`, `0 255 255`, `rgb(0 0 0 / 0.5)`, `rgba(0, 0, 0, 0.5)`.
static RGB_CHANNELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:rgba?\()?([0-9]+\.?[0-9]*)[\s,]*([0-9]+\.?[0-9]*)[\s,]*([0-9]+\.?[0-9]*)(?:[\s,]*(?:/|,)[\s,]*([0-9]*\.?[0-9]+%?))?(?:\))?;?$",
    )
    .expect("rgb channel pattern is valid")
});

/// Channel values with or without an `hsl()`/`hsla()` wrapper. Hue may carry a `deg` or `turn`
/// unit, saturation and lightness must be percentages. Units are kept verbatim.
///
/// Matches `hsl(50 80% 40%)`, `0.3turn 60% 45% / .7`.
static HSL_CHANNELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:hsla?\()?([0-9]*\.?[0-9]+(?:deg|turn)?|[0-9]+\.?[0-9]*%)\s*[\s,]+([0-9]+\.?[0-9]*%)\s*[\s,]+([0-9]+\.?[0-9]*%)(?:\s*[\s,]*(?:/|,)\s*([0-9]*\.?[0-9]+%?))?\s*(?:\))?;?$",
    )
    .expect("hsl channel pattern is valid")
});

/// The color syntax an input string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
    Transparent,
    /// Anything else: variable references, newer color spaces, typos. Passed through untouched.
    Raw,
}

/// A classified color string.
///
/// `channels` holds the decimal RGB triple for hex input, the three captured components for
/// rgb/hsl input (units such as `%`, `deg`, `turn` preserved) and nothing for transparent or raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDescriptor {
    pub format: ColorFormat,
    pub channels: Vec<String>,
    pub alpha: Option<String>,
    source: String,
}

impl ColorDescriptor {
    /// Classify `input`. Never fails: unrecognized input yields a [`ColorFormat::Raw`] descriptor.
    pub fn detect(input: &str) -> Self {
        if input == "transparent" {
            return Self::bare(ColorFormat::Transparent, input);
        }

        // A leading `#` commits to hex; a malformed hex string is not retried as rgb.
        if input.starts_with('#') {
            return match Color::from_css_hex(input) {
                Some(color) => Self {
                    format: ColorFormat::Hex,
                    channels: vec![
                        color.r.to_string(),
                        color.g.to_string(),
                        color.b.to_string(),
                    ],
                    alpha: None,
                    source: input.to_string(),
                },
                None => Self::bare(ColorFormat::Raw, input),
            };
        }

        if let Some(descriptor) = Self::capture(&RGB_CHANNELS, ColorFormat::Rgb, input) {
            return descriptor;
        }
        if let Some(descriptor) = Self::capture(&HSL_CHANNELS, ColorFormat::Hsl, input) {
            return descriptor;
        }

        Self::bare(ColorFormat::Raw, input)
    }

    fn bare(format: ColorFormat, input: &str) -> Self {
        Self {
            format,
            channels: Vec::new(),
            alpha: None,
            source: input.to_string(),
        }
    }

    fn capture(pattern: &Regex, format: ColorFormat, input: &str) -> Option<Self> {
        let caps = pattern.captures(input)?;
        let channels = (1..=3)
            .map(|i| caps.get(i).map_or("", |m| m.as_str()).to_string())
            .collect();
        Some(Self {
            format,
            channels,
            alpha: caps.get(4).map(|m| m.as_str().to_string()),
            source: input.to_string(),
        })
    }

    /// The string this descriptor was detected from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_recognized(&self) -> bool {
        self.format != ColorFormat::Raw
    }

    /// Resolve to an opaque sRGB color, ignoring alpha. `None` for transparent, raw and
    /// out-of-grammar hue units.
    pub fn to_color(&self) -> Option<Color> {
        match self.format {
            ColorFormat::Hex | ColorFormat::Rgb => {
                let mut channel = self.channels.iter().map(|c| {
                    c.parse::<f32>()
                        .ok()
                        .map(|v| v.clamp(0.0, 255.0).round() as u8)
                });
                Some(Color::new(channel.next()??, channel.next()??, channel.next()??))
            }
            ColorFormat::Hsl => {
                let hue = parse_hue(&self.channels[0])?;
                let saturation = parse_percent(&self.channels[1])?;
                let lightness = parse_percent(&self.channels[2])?;
                let hsl: Hsl = Hsl::new(hue, saturation, lightness);
                let srgb: Srgb<f32> = Srgb::from_color(hsl);
                Some(Color::new(
                    (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
                    (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
                    (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
                ))
            }
            ColorFormat::Transparent | ColorFormat::Raw => None,
        }
    }
}

/// Hue in degrees from a bare number, `deg` or `turn` value.
fn parse_hue(value: &str) -> Option<f32> {
    if let Some(turns) = value.strip_suffix("turn") {
        return turns.parse::<f32>().ok().map(|t| t * 360.0);
    }
    value.strip_suffix("deg").unwrap_or(value).parse().ok()
}

/// `40%` -> `0.4`.
fn parse_percent(value: &str) -> Option<f32> {
    let percent: f32 = value.strip_suffix('%')?.parse().ok()?;
    Some((percent / 100.0).clamp(0.0, 1.0))
}
