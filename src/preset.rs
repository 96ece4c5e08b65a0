//! The built-in theme palette: a slate neutral scale and a cyan brand scale arranged into the
//! layout, navigation, code, box, hero and prose content tokens of a typical site.

use crate::cli::ThemeMode;
use crate::color::Color;
use crate::token::{ThemeTokenTree, TokenValue};

/// A Tailwind-style shade scale, 50 through 950.
#[derive(Debug, Clone, Copy)]
pub struct Scale([(u16, Color); 11]);

impl Scale {
    /// The color for `shade`, e.g. `700`.
    ///
    /// # Panics
    /// If `shade` is not one of 50, 100, 200, ... 900, 950.
    pub fn shade(&self, shade: u16) -> Color {
        self.0
            .iter()
            .find(|(s, _)| *s == shade)
            .map(|(_, color)| *color)
            .unwrap_or_else(|| panic!("no shade {shade} in scale"))
    }

    fn as_tree(&self) -> TokenValue {
        TokenValue::subtree(self.0.iter().map(|(s, c)| (s.to_string(), TokenValue::from(*c))))
    }
}

pub const SLATE: Scale = Scale([
    (50, Color::new(0xf8, 0xfa, 0xfc)),
    (100, Color::new(0xf1, 0xf5, 0xf9)),
    (200, Color::new(0xe2, 0xe8, 0xf0)),
    (300, Color::new(0xcb, 0xd5, 0xe1)),
    (400, Color::new(0x94, 0xa3, 0xb8)),
    (500, Color::new(0x64, 0x74, 0x8b)),
    (600, Color::new(0x47, 0x55, 0x69)),
    (700, Color::new(0x33, 0x41, 0x55)),
    (800, Color::new(0x1e, 0x29, 0x3b)),
    (900, Color::new(0x0f, 0x17, 0x2a)),
    (950, Color::new(0x02, 0x06, 0x17)),
]);

pub const CYAN: Scale = Scale([
    (50, Color::new(0xec, 0xfe, 0xff)),
    (100, Color::new(0xcf, 0xfa, 0xfe)),
    (200, Color::new(0xa5, 0xf3, 0xfc)),
    (300, Color::new(0x67, 0xe8, 0xf9)),
    (400, Color::new(0x22, 0xd3, 0xee)),
    (500, Color::new(0x06, 0xb6, 0xd4)),
    (600, Color::new(0x08, 0x91, 0xb2)),
    (700, Color::new(0x0e, 0x74, 0x90)),
    (800, Color::new(0x15, 0x5e, 0x75)),
    (900, Color::new(0x16, 0x4e, 0x63)),
    (950, Color::new(0x08, 0x33, 0x44)),
]);

/// A `[light, dark]` pair of authored colors, kept as colors so shades can be derived from it.
#[derive(Debug, Clone, Copy)]
struct Pair(Color, Color);

impl Pair {
    fn pick(self, mode: ThemeMode) -> Color {
        match mode {
            ThemeMode::Light => self.0,
            ThemeMode::Dark => self.1,
        }
    }

    fn map(self, f: impl Fn(Color) -> Color) -> Pair {
        Pair(f(self.0), f(self.1))
    }
}

impl From<Pair> for TokenValue {
    fn from(pair: Pair) -> Self {
        // Derived shades are emitted in legacy rgb() notation, plain scale shades as hex.
        TokenValue::pair(render(pair.0), render(pair.1))
    }
}

fn render(color: Color) -> String {
    if [SLATE, CYAN]
        .iter()
        .any(|scale| scale.0.iter().any(|(_, c)| *c == color))
    {
        color.to_hex()
    } else {
        color.to_rgb_string()
    }
}

fn tree<const N: usize>(entries: [(&str, TokenValue); N]) -> TokenValue {
    TokenValue::subtree(entries)
}

/// The default palette definition.
///
/// `content` feeds the prose variables; `copy` is text, `fg` a foreground on the matching
/// background, `DEFAULT` usually a background.
pub fn default_palette() -> ThemeTokenTree {
    let neutral = SLATE;
    let brand = CYAN;

    let primary_copy = Pair(brand.shade(700).darken(0.03), brand.shade(600).lighten(0.045));
    let primary_light = Pair(brand.shade(600), brand.shade(600));
    let primary = tree([
        ("copy", primary_copy.into()),
        ("light", primary_light.into()),
        ("DEFAULT", render(brand.shade(700)).into()),
        (
            "hover",
            Pair(brand.shade(700), brand.shade(700))
                .map(|c| c.lighten(0.02))
                .into(),
        ),
        ("dark", render(brand.shade(800)).into()),
        ("fg", Pair(neutral.shade(100), neutral.shade(100)).into()),
    ]);

    let copy = Pair(neutral.shade(700), neutral.shade(300));

    let main_background = Pair(neutral.shade(200), neutral.shade(800));
    let main_background_hover = Pair(
        main_background.0.darken(0.025),
        main_background.1.darken(0.015),
    );
    let main_outline = Pair(neutral.shade(300), neutral.shade(700));

    let block_background = Pair(neutral.shade(700), neutral.shade(800).darken(0.04));
    let block_background_hover = Pair(
        block_background.0.lighten(0.01),
        block_background.1.darken(0.01),
    );
    let block_foreground = render(neutral.shade(400).lighten(0.1));
    let block_divider = block_background.map(|c| c.lighten(0.04));
    let pale = Pair(neutral.shade(200), neutral.shade(300));

    let layout = tree([
        ("header", tree([("DEFAULT", block_background.into())])),
        (
            "main",
            tree([
                ("DEFAULT", main_background.into()),
                ("hover", main_background_hover.into()),
                ("border", main_outline.into()),
            ]),
        ),
        (
            "footer",
            tree([
                ("DEFAULT", block_background.into()),
                ("fg", block_foreground.as_str().into()),
            ]),
        ),
        ("divider", block_divider.into()),
    ]);

    let nav = tree([
        ("menu", tree([("DEFAULT", block_background.into())])),
        (
            "button",
            tree([
                ("DEFAULT", "transparent".into()),
                ("hover", block_background_hover.into()),
                ("fg", block_foreground.as_str().into()),
            ]),
        ),
        (
            "logo",
            tree([
                ("DEFAULT", block_foreground.as_str().into()),
                ("hover", pale.into()),
            ]),
        ),
        (
            "link",
            tree([
                ("DEFAULT", block_foreground.as_str().into()),
                ("hover", primary_light.into()),
                ("current", pale.into()),
            ]),
        ),
    ]);

    let code = tree([(
        "block",
        tree([(
            "DEFAULT",
            Pair(neutral.shade(700), neutral.shade(800).darken(0.05)).into(),
        )]),
    )]);

    let boxed = tree([
        ("DEFAULT", Pair(neutral.shade(300), neutral.shade(700)).into()),
        ("fg", copy.into()),
        ("outline", main_outline.into()),
        (
            "inset",
            tree([
                ("DEFAULT", Pair(neutral.shade(200), neutral.shade(800)).into()),
                ("fg", Pair(neutral.shade(800), neutral.shade(200)).into()),
            ]),
        ),
    ]);

    let hero = tree([
        ("DEFAULT", neutral.shade(700).into()),
        ("fg", tree([("DEFAULT", neutral.shade(50).into())])),
        ("caption", tree([("fg", neutral.shade(300).into())])),
        (
            "button",
            tree([
                (
                    "primary",
                    tree([
                        ("DEFAULT", neutral.shade(100).into()),
                        ("hover", neutral.shade(300).into()),
                        (
                            "fg",
                            tree([
                                ("DEFAULT", neutral.shade(700).into()),
                                ("hover", primary.clone()),
                            ]),
                        ),
                        (
                            "border",
                            tree([
                                ("DEFAULT", "transparent".into()),
                                ("hover", "transparent".into()),
                            ]),
                        ),
                    ]),
                ),
                (
                    "alt",
                    tree([
                        ("DEFAULT", "transparent".into()),
                        ("hover", render(neutral.shade(700).lighten(0.02)).into()),
                        (
                            "fg",
                            tree([
                                ("DEFAULT", neutral.shade(50).into()),
                                ("hover", primary_light.into()),
                            ]),
                        ),
                        (
                            "border",
                            tree([
                                ("DEFAULT", neutral.shade(100).into()),
                                ("hover", primary.clone()),
                            ]),
                        ),
                    ]),
                ),
            ]),
        ),
    ]);

    let link_hover = Pair(
        primary_copy.pick(ThemeMode::Light).lighten(0.02),
        primary_copy.pick(ThemeMode::Dark).darken(0.08),
    );
    let muted = Pair(
        copy.pick(ThemeMode::Light).lighten(0.1),
        copy.pick(ThemeMode::Dark).darken(0.1),
    );

    let content = tree([
        ("heading", Pair(neutral.shade(700), neutral.shade(300)).into()),
        (
            "copy",
            tree([("DEFAULT", copy.into()), ("muted", muted.into())]),
        ),
        ("code", Pair(neutral.shade(600), neutral.shade(400)).into()),
        (
            "caption",
            Pair(neutral.shade(600), neutral.shade(500).lighten(0.04)).into(),
        ),
        ("lead", Pair(neutral.shade(600), neutral.shade(400)).into()),
        ("divider", Pair(neutral.shade(600), neutral.shade(200)).into()),
        (
            "link",
            tree([
                ("DEFAULT", primary_copy.into()),
                ("hover", link_hover.into()),
            ]),
        ),
        (
            "list",
            tree([("bullet", Pair(neutral.shade(400), neutral.shade(600)).into())]),
        ),
        (
            "table",
            tree([
                ("th", Pair(neutral.shade(300), neutral.shade(500)).into()),
                ("td", Pair(neutral.shade(300), neutral.shade(600)).into()),
            ]),
        ),
    ]);

    let entries = [
        ("primary", primary),
        ("neutral", neutral.as_tree()),
        ("layout", layout),
        ("nav", nav),
        ("code", code),
        ("box", boxed),
        ("hero", hero),
        ("content", content),
    ];
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
