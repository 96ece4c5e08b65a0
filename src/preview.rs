use std::io::Write;

use anyhow::Result;
use crossterm::style::{Color as TermColor, Stylize};

use crate::color::Color;
use crate::detect::ColorDescriptor;
use crate::walker::CssVariables;

const SWATCH_WIDTH: usize = 8;

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Black or white, whichever reads better on `background`.
fn contrast_fg(background: Color) -> Color {
    let black = Color::new(0, 0, 0);
    let white = Color::new(255, 255, 255);
    if Color::contrast_ratio(&background, &black) >= Color::contrast_ratio(&background, &white) {
        black
    } else {
        white
    }
}

/// One line per variable: a swatch (when the value resolves to a color), the name and the value.
pub fn preview_lines(variables: &CssVariables) -> Vec<String> {
    let width = variables.keys().map(String::len).max().unwrap_or(0);
    variables
        .iter()
        .map(|(name, value)| {
            let swatch = match ColorDescriptor::detect(value).to_color() {
                Some(color) => format!("{:^SWATCH_WIDTH$}", color.to_hex())
                    .with(to_term(contrast_fg(color)))
                    .on(to_term(color))
                    .to_string(),
                None => format!("{:^SWATCH_WIDTH$}", "-").dim().to_string(),
            };
            format!("{swatch} {name:<width$}  {value}")
        })
        .collect()
}

/// Write the preview to `out`.
pub fn print_preview(out: &mut impl Write, variables: &CssVariables) -> Result<()> {
    for line in preview_lines(variables) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
