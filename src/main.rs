//! Footfall: ground-contact intervals and gait diagrams
//!
//! Usage: footfall <INPUT> <THRESHOLD> [OPTIONS]

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use footfall::channels::{read_channels, GaitError};
use footfall::config::{FormatConfig, DEFAULT_COMMENT, DEFAULT_SEPARATOR};
use footfall::contact::ContactCommand;
use footfall::interval::RangeSpec;
use footfall::output::IntervalWriter;
use footfall::render::GaitDiagram;

#[derive(Parser)]
#[command(name = "footfall")]
#[command(version)]
#[command(about = "Footfall: extract ground-contact intervals from multi-leg sensor logs and draw gait diagrams", long_about = None)]
struct Cli {
    /// Recording with one '#'-commented header line per channel
    input: PathBuf,

    /// Contact threshold: positive means value >= threshold, negative means value <= threshold
    #[arg(value_parser = parse_threshold, allow_negative_numbers = true)]
    threshold: f64,

    /// Time window in steps: MIN:MAX, MAX, MIN: or :MAX (clamped to the recording)
    #[arg(short, long, value_parser = parse_range)]
    range: Option<RangeSpec>,

    /// Draw grid lines
    #[arg(short, long)]
    grid: bool,

    /// Diagram title
    #[arg(long)]
    title: Option<String>,

    /// Render the gait diagram to this SVG file (.svg is appended if no extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comment marker introducing header lines
    #[arg(long, default_value = DEFAULT_COMMENT)]
    comment: String,

    /// Field separator between samples (\t for tab)
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// Print extraction statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid threshold '{}'", s))?;
    if !value.is_finite() {
        return Err(format!("threshold must be finite, got '{}'", s));
    }
    Ok(value)
}

fn parse_range(s: &str) -> Result<RangeSpec, String> {
    s.parse::<RangeSpec>().map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only intervals
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            eprintln!("Error: failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GaitError> {
    let format = FormatConfig::new(&cli.comment, &cli.separator)?;
    let matrix = read_channels(&cli.input, &format)?;
    info!(
        "loaded {} channels x {} steps from {}",
        matrix.channel_count(),
        matrix.step_count(),
        cli.input.display()
    );

    let mut cmd = ContactCommand::new(cli.threshold);
    if let Some(range) = cli.range {
        cmd = cmd.with_range(range);
    }
    let contacts = cmd.extract(&matrix);

    let stdout = io::stdout();
    let mut writer = IntervalWriter::new(stdout.lock());
    let written = writer.write_contacts(&contacts)?;
    writer.flush()?;
    debug!("wrote {} intervals", written);

    if cli.stats {
        eprintln!("Contact stats: {}", contacts.stats());
    }

    let Some(output) = cli.output else {
        if cli.grid || cli.title.is_some() {
            warn!("--grid and --title only affect the diagram; ignored without --output");
        }
        return Ok(());
    };

    let mut diagram = GaitDiagram::new().with_grid(cli.grid);
    if let Some(title) = cli.title {
        diagram = diagram.with_title(title);
    }
    let path = diagram.render(&contacts, &output)?;
    info!("gait diagram saved to {}", path.display());

    Ok(())
}
