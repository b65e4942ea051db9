//! Cardapio theme CLI
//!
//! Build tenant CSS from a `theme.toml`, check contrast pairs and inspect
//! generated scales.

mod config;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cardapio_core::Color;
use cardapio_theme::{
    auto_correct, build_scale, build_theme_tokens, check_pair, preview_theme, AccessibilityLevel,
    AdjustedSide, ColorPair, CorrectionOutcome, CorrectionPolicy, ScaleOptions, StepKey,
    ThemeBuildResult,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardapio-theme")]
#[command(about = "Build and inspect Cardapio tenant themes", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter theme.toml
    Init {
        /// Theme name
        #[arg(default_value = "Meu Restaurante")]
        name: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Build a theme and print its CSS
    Build {
        /// Theme file or directory containing theme.toml
        path: Option<PathBuf>,

        #[arg(long)]
        primary: Option<String>,

        #[arg(long)]
        secondary: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Css)]
        format: Format,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check contrast between two colors
    Check {
        foreground: String,
        background: String,

        #[arg(long, default_value = "AA")]
        level: AccessibilityLevel,

        /// Suggest a corrected pair when the check fails
        #[arg(long)]
        fix: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the scale generated for one color
    Scale {
        color: String,

        /// Comma-separated step keys
        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<StepKey>>,

        /// Keep full saturation at the extremes
        #[arg(long)]
        no_taper: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print swatches and the contrast report for a theme
    Preview {
        path: Option<PathBuf>,

        #[arg(long)]
        primary: Option<String>,

        #[arg(long)]
        secondary: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Css,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Init { name, force } => cmd_init(&name, force),
        Commands::Build {
            path,
            primary,
            secondary,
            format,
            output,
        } => cmd_build(path, primary, secondary, format, output),
        Commands::Check {
            foreground,
            background,
            level,
            fix,
            format,
        } => cmd_check(&foreground, &background, level, fix, format),
        Commands::Scale {
            color,
            keys,
            no_taper,
            format,
        } => cmd_scale(&color, keys, no_taper, format),
        Commands::Preview {
            path,
            primary,
            secondary,
            format,
        } => cmd_preview(path, primary, secondary, format),
    }
}

fn cmd_init(name: &str, force: bool) -> Result<ExitCode> {
    let path = PathBuf::from(config::THEME_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let document = config::starter_document(name);
    fs::write(&path, config::to_toml(&document)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn build_from(
    path: Option<PathBuf>,
    primary: Option<String>,
    secondary: Option<String>,
) -> Result<(cardapio_theme::ThemeDocument, ThemeBuildResult)> {
    let document = config::with_colors(config::load_theme(path.as_deref())?, primary, secondary);
    let result =
        build_theme_tokens(&document.input, &document.options).context("Failed to build theme")?;
    Ok((document, result))
}

fn cmd_build(
    path: Option<PathBuf>,
    primary: Option<String>,
    secondary: Option<String>,
    format: Format,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let (_, result) = build_from(path, primary, secondary)?;

    for line in &result.report.diagnostics {
        eprintln!("aviso: {line}");
    }
    for adjustment in &result.report.adjustments {
        eprintln!("ajuste: {}", adjustment.message);
    }
    for warning in &result.report.warnings {
        eprintln!("contraste: {}", warning.message);
    }

    let text = match format {
        Format::Css | Format::Text => result.css.clone(),
        Format::Json => serde_json::to_string_pretty(&result)?,
    };
    match output {
        Some(path) => fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{text}"),
    }

    Ok(if result.report.warnings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

#[derive(Serialize)]
struct CheckOutput {
    foreground: Color,
    background: Color,
    ratio: f64,
    level: String,
    passes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<ColorPair>,
}

fn cmd_check(
    foreground: &str,
    background: &str,
    level: AccessibilityLevel,
    fix: bool,
    format: Format,
) -> Result<ExitCode> {
    let fg = Color::parse_hex(foreground).with_context(|| format!("Invalid foreground {foreground:?}"))?;
    let bg = Color::parse_hex(background).with_context(|| format!("Invalid background {background:?}"))?;
    let check = check_pair(fg, bg);
    let passes = check.meets(level);

    let suggestion = if fix && !passes {
        let policy = CorrectionPolicy::for_level(level).prefer(AdjustedSide::Foreground);
        match auto_correct(ColorPair::new(bg, fg), &policy) {
            CorrectionOutcome::Corrected(correction) => Some(correction.pair),
            CorrectionOutcome::Accessible(_) | CorrectionOutcome::Unresolved(_) => None,
        }
    } else {
        None
    };

    let out = CheckOutput {
        foreground: fg,
        background: bg,
        ratio: check.ratio,
        level: check.level.to_string(),
        passes,
        suggestion,
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&out)?),
        Format::Text | Format::Css => {
            let verdict = if passes { "pass" } else { "FAIL" };
            println!(
                "{fg} on {bg}: {:.2}:1 ({}), {level} {verdict}",
                out.ratio, out.level
            );
            if let Some(pair) = out.suggestion {
                println!("suggested: {} on {}", pair.foreground, pair.background);
            }
        }
    }

    Ok(if passes {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_scale(
    color: &str,
    keys: Option<Vec<StepKey>>,
    no_taper: bool,
    format: Format,
) -> Result<ExitCode> {
    let base = Color::parse_hex(color).with_context(|| format!("Invalid color {color:?}"))?;
    let keys = keys.unwrap_or_else(|| cardapio_theme::scale::DEFAULT_STEP_KEYS.to_vec());
    let scale = build_scale(
        base,
        &keys,
        ScaleOptions {
            saturation_taper: !no_taper,
        },
    )?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&scale)?),
        Format::Css => {
            for step in scale.iter() {
                println!("--scale-{}: {};", step.key, step.color);
            }
        }
        Format::Text => {
            for step in scale.iter() {
                let marker = if step.key == scale.anchor_key() { " *" } else { "" };
                println!("{:>5}  {}  L {:>5.1}{marker}", step.key, step.color, step.lightness);
            }
            if scale.is_widened() {
                println!("(curve widened to keep steps distinct)");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_preview(
    path: Option<PathBuf>,
    primary: Option<String>,
    secondary: Option<String>,
    format: Format,
) -> Result<ExitCode> {
    let document = config::with_colors(config::load_theme(path.as_deref())?, primary, secondary);
    let preview = preview_theme(&document.input, &document.options)?;

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(reason) = &preview.fallback_reason {
        println!("Tema padrão exibido: {reason}");
    }
    println!("{} ({})", preview.result.name, preview.result.level);
    for swatch in &preview.swatches {
        let marker = if swatch.is_anchor { "*" } else { " " };
        println!("  {:<9} {:>4}{marker} {}", swatch.scale, swatch.key, swatch.color);
    }
    println!();
    for entry in &preview.contrast {
        let badge = if entry.warned {
            "FAIL"
        } else if entry.adjusted {
            "adj "
        } else {
            "ok  "
        };
        println!(
            "  {badge} {:<24} {} / {}  {:>5.2}:1",
            entry.slot.css_name(),
            entry.foreground,
            entry.background,
            entry.check.ratio
        );
    }
    println!(
        "{}/{} pares atingem {}",
        preview.passing(),
        preview.contrast.len(),
        preview.result.level
    );
    Ok(ExitCode::SUCCESS)
}
