use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tailpal::cli::{Args, OutputFormat};
use tailpal::config::PaletteOptions;
use tailpal::logging::init_logging;
use tailpal::preset::default_palette;
use tailpal::preview::print_preview;
use tailpal::theme::ThemeOutput;

fn main() {
    let args = Args::parse();
    if let Err(error) = init_logging(args.verbose) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(&args) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Document options first, then command-line overrides.
fn load_options(args: &Args) -> Result<PaletteOptions> {
    let mut options = match &args.input {
        Some(path) => PaletteOptions::load(path)
            .with_context(|| format!("failed to load palette from {}", path.display()))?,
        None => {
            info!("no input given, using the built-in palette");
            PaletteOptions::with_palette(default_palette())
        }
    };
    if let Some(prefix) = &args.prefix {
        options.prefix = prefix.clone();
    }
    if args.no_typography_alpha {
        options.typography.apply_alpha = false;
    }
    options.strict_mode_pairs |= args.strict_mode_pairs;
    options.collect_errors |= args.collect_errors;
    Ok(options)
}

fn run(args: &Args) -> Result<()> {
    let options = load_options(args)?;

    if args.preview {
        let variables = options.walker().css_variables(&options.palette, args.mode)?;
        let mut stdout = std::io::stdout().lock();
        return print_preview(&mut stdout, &variables);
    }

    let output = ThemeOutput::build(&options)?;
    let content = match args.format {
        OutputFormat::Css => output.to_css(),
        OutputFormat::Json => output.to_json()?,
        OutputFormat::All => format!("{}\n{}", output.to_css(), output.to_json()?),
    };

    match &args.output {
        Some(path) => {
            ThemeOutput::write_to(&content, path)?;
            info!(path = %path.display(), "wrote theme");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
