//! Digit Randomness CLI
//!
//! Command-line front end: runs the tabular vs. algorithmic comparison
//! or scores a hand-entered sequence.

use clap::{Args, Parser, Subcommand};
use digit_randomness::{ConfigError, ConfigFields, Experiment, FileConfig, Result, RunConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "digit-randomness", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate digits with both methods and score them.
    Run(RunArgs),
    /// Score a hand-entered sequence of integers.
    Score(ScoreArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// TOML configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Numbers per width class (at least 10).
    #[arg(long)]
    count: Option<String>,
    /// Multiplier a.
    #[arg(short, long)]
    a: Option<String>,
    /// Increment b.
    #[arg(short, long)]
    b: Option<String>,
    /// Modulus c.
    #[arg(short, long)]
    c: Option<String>,
    /// Digit source file for the tabular method.
    #[arg(long)]
    source: Option<String>,
    /// Initial generator state.
    #[arg(long, value_parser = seed_parser())]
    seed: Option<u64>,
    /// Seed for shuffling the digit pool.
    #[arg(long, value_parser = seed_parser())]
    shuffle_seed: Option<u64>,
    /// Table rows to print.
    #[arg(long, default_value_t = 15)]
    rows: usize,
    /// Write the full report as TOML to this path.
    #[arg(long)]
    toml_out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ScoreArgs {
    /// Inclusive lower bound of the declared range.
    #[arg(long, requires = "high")]
    low: Option<u64>,
    /// Exclusive upper bound of the declared range.
    #[arg(long, requires = "low")]
    high: Option<u64>,
    /// Values to score.
    #[arg(required = true)]
    values: Vec<u64>,
}

/// Seeds are written to the TOML report, whose integers are signed 64-bit.
fn seed_parser() -> clap::builder::RangedU64ValueParser<u64> {
    clap::value_parser!(u64).range(..=i64::MAX as u64)
}

fn main() {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Score(args) => score(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: RunArgs) -> Result<()> {
    info!("Digit Randomness v{}", digit_randomness::VERSION);

    // Flags override file values, so the file is only validated after merging
    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };
    let config = merge(&args, &file.run)?;

    let experiment = Experiment::new(file.thresholds);
    let report = experiment.run(&config)?;

    let toml = args.toml_out.as_ref().map(|_| report.to_toml()).transpose()?;

    print!("{}", report.table(args.rows));

    if let (Some(path), Some(toml)) = (&args.toml_out, toml) {
        std::fs::write(path, toml)?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

/// Applies command-line overrides to the file configuration and validates the result.
fn merge(args: &RunArgs, file: &RunConfig) -> std::result::Result<RunConfig, ConfigError> {
    let mut fields = ConfigFields::from(file);
    let overrides = [
        (&mut fields.count, &args.count),
        (&mut fields.a, &args.a),
        (&mut fields.b, &args.b),
        (&mut fields.c, &args.c),
        (&mut fields.source_path, &args.source),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            field.clone_from(value);
        }
    }

    let mut config = fields.parse()?;
    config.generator.seed = args.seed.unwrap_or(file.generator.seed);
    config.shuffle_seed = args.shuffle_seed.or(file.shuffle_seed);
    Ok(config)
}

fn score(args: ScoreArgs) -> Result<()> {
    let range = args.low.zip(args.high);
    let experiment = Experiment::default();
    let (coefficient, diagnostics) = experiment.score_values(args.values, range)?;

    println!("Coefficient: {}", coefficient);
    println!(
        "Chi-square:  {:.4} ({} degrees of freedom)",
        coefficient.chi_squared, coefficient.degrees_of_freedom
    );
    if let Some(p_value) = coefficient.p_value {
        println!("p-value:     {:.4}", p_value);
    }
    println!(
        "Mean:        {:.4} (variance {:.4})",
        diagnostics.mean, diagnostics.variance
    );
    println!("Lag-1 corr.: {:.4}", diagnostics.autocorrelation);
    println!("Missing:     {} values never drawn", diagnostics.missing_values);
    if let Err(violation) = experiment.thresholds().check(&coefficient) {
        println!("Warning:     {}", violation);
    }

    Ok(())
}
