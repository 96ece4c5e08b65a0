//! Channel-only rendering of a detected color: the value stored inside a custom property so a
//! stylesheet can wrap it as `rgb(var(--x) / <alpha>)`.

use crate::detect::{ColorDescriptor, ColorFormat};

/// Render `descriptor` as `R G B`, `R G B / A`, `H S% L%`, `H S% L% / A` or `transparent`.
/// Raw descriptors render as their original input.
pub fn format_channels(descriptor: &ColorDescriptor) -> String {
    match descriptor.format {
        ColorFormat::Hex | ColorFormat::Rgb | ColorFormat::Hsl => {
            let joined = descriptor.channels.join(" ");
            match &descriptor.alpha {
                Some(alpha) => format!("{joined} / {alpha}"),
                None => joined,
            }
        }
        ColorFormat::Transparent => "transparent".to_string(),
        ColorFormat::Raw => descriptor.source().to_string(),
    }
}

/// Detect and render in one step.
pub fn channel_values(color: &str) -> String {
    format_channels(&ColorDescriptor::detect(color))
}
