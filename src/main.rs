//! CLI entry point: load a generator config, sample the minimum-jerk trajectory, write CSV or JSON.

use clap::{Parser, Subcommand, ValueEnum};
use minjerk::config::load_config;
use minjerk::export::{to_json, write_csv};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Minimum-jerk trajectory generator
#[derive(Parser, Debug)]
#[command(name = "minjerk", about = "Sample a minimum-jerk trajectory between two waypoints.")]
struct Cli {
    /// Path to a TOML generator config
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate and write the trajectory (default)
    Generate,
    /// Validate the config and print it back without generating
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for trajectory output
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(io::stderr)
        .init();

    let config_path = cli.config.to_string_lossy();
    tracing::debug!("Loading configuration from: {}", config_path);
    let config = load_config(&config_path)?;

    if let Some(Commands::Check) = cli.command {
        print!("{}", toml::to_string(&config)?);
        return Ok(());
    }

    let generator = config.build();
    if !generator.is_configured() {
        return Err("generator rejected the configured endpoints".into());
    }
    tracing::info!(
        "Generated {} samples over {:.6} s ({} axes)",
        generator.sample_count(),
        generator.tau(),
        generator.dim()
    );

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match cli.format {
        Format::Csv => write_csv(generator.trajectory(), &mut out)?,
        Format::Json => writeln!(out, "{}", to_json(&generator)?)?,
    }
    out.flush()?;

    if let Some(path) = &cli.output {
        tracing::info!("Wrote trajectory to {}", path.display());
    }
    Ok(())
}
