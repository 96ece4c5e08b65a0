use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Generate light/dark CSS variables, a utility-framework color config and prose variables from
/// a theme palette definition.
#[derive(Parser, Debug)]
#[command(name = "tailpal", version, about)]
pub struct Args {
    /// Palette document (JSON). The built-in preset is used if omitted
    pub input: Option<PathBuf>,

    /// What to emit
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CSS variable namespace, e.g. `P` for `--P-primary`
    #[arg(long)]
    pub prefix: Option<String>,

    /// Use full opacity for prose content colors
    #[arg(long)]
    pub no_typography_alpha: bool,

    /// Fail when a light/dark pair differs in format or alpha
    #[arg(long)]
    pub strict_mode_pairs: bool,

    /// Report every invalid palette value instead of stopping at the first
    #[arg(long)]
    pub collect_errors: bool,

    /// Print colored swatches of the resolved variables instead of generating output
    #[arg(long)]
    pub preview: bool,

    /// Mode to preview
    #[arg(short, long, value_enum, default_value_t = ThemeMode::Light, requires = "preview")]
    pub mode: ThemeMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `:root` and `.dark` declaration blocks
    Css,
    /// Color and typography config as JSON
    Json,
    /// Stylesheet followed by the JSON config
    All,
}
