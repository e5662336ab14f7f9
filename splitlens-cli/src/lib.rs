#![warn(missing_docs)]
//! Splitlens CLI Library
//!
//! Command-line front end: argument parsing, `splitlens.toml` discovery,
//! logging setup and the per-file pipeline. Use `splitlens_cli::run()` in a
//! `main` function to get the full CLI.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     splitlens_cli::run()
//! }
//! ```

mod config;
mod pipeline;

pub use config::*;
pub use pipeline::{PipelineSettings, ProcessedFile, process_file, process_files, prompt_loop};

use clap::{Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use splitlens_core::{MAX_PRECISION, TimeCodec};
use splitlens_report::OutputFormat;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Splitlens CLI arguments
#[derive(Parser, Debug)]
#[command(name = "splitlens")]
#[command(
    author,
    version,
    about = "Splitlens - statistics, reports and charts for LiveSplit split files"
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// `.lss` files to analyse; prompts for paths when none are given
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one folder per split file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format: text, csv, json (repeatable)
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Fraction digits of rendered durations
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_PRECISION as i64))]
    pub precision: Option<u8>,

    /// Skip SVG chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Number of threads for per-segment statistics
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a default splitlens.toml
    Init,
}

/// Run the Splitlens CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if any input file failed.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Splitlens CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    if let Some(Commands::Init) = cli.command {
        print!("{}", SplitlensConfig::default_toml());
        return Ok(());
    }

    init_logging(cli.verbose);

    // Discover splitlens.toml configuration (CLI flags override)
    let config = SplitlensConfig::discover().unwrap_or_default();
    let settings = resolve_settings(&cli, &config)?;

    // Configure Rayon thread pool for statistics computation
    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    if cli.inputs.is_empty() {
        let stdin = std::io::stdin();
        return prompt_loop(stdin.lock(), std::io::stdout(), &settings);
    }

    let failures = process_files(&cli.inputs, &settings);
    info!(
        processed = cli.inputs.len() - failures,
        failed = failures,
        "finished"
    );
    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, cli.inputs.len());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "splitlens=debug"
    } else {
        "splitlens=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Merge CLI flags over the configuration file
pub fn resolve_settings(cli: &Cli, config: &SplitlensConfig) -> anyhow::Result<PipelineSettings> {
    let formats = if cli.formats.is_empty() {
        config.formats()?
    } else {
        cli.formats.clone()
    };

    let precision = cli.precision.unwrap_or(config.codec.precision);
    let charts = (config.charts.enabled && !cli.no_charts).then(|| config.charts.chart_config());

    Ok(PipelineSettings {
        output_dir: cli
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.directory)),
        formats,
        codec: TimeCodec::new(precision),
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "splitlens",
            "a.lss",
            "b.lss",
            "-o",
            "out",
            "-f",
            "json",
            "--format",
            "csv",
            "--precision",
            "3",
            "--no-charts",
            "-j",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.inputs, vec![PathBuf::from("a.lss"), PathBuf::from("b.lss")]);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.formats, vec![OutputFormat::Json, OutputFormat::Csv]);
        assert_eq!(cli.precision, Some(3));
        assert!(cli.no_charts);
        assert_eq!(cli.threads, 2);
    }

    #[test]
    fn test_cli_rejects_excess_precision() {
        assert!(Cli::try_parse_from(["splitlens", "--precision", "7"]).is_err());
        assert!(Cli::try_parse_from(["splitlens", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_cli_init_subcommand() {
        let cli = Cli::try_parse_from(["splitlens", "init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));
        assert!(cli.inputs.is_empty());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = SplitlensConfig::default();
        config.output.directory = "reports".to_string();
        config.codec.precision = 4;

        let cli = Cli::try_parse_from(["splitlens", "--precision", "1", "--no-charts"]).unwrap();
        let settings = resolve_settings(&cli, &config).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("reports"));
        assert_eq!(settings.codec.precision(), 1);
        assert_eq!(settings.charts, None);
        assert_eq!(settings.formats, OutputFormat::ALL.to_vec());
    }

    #[test]
    fn test_config_applies_without_flags() {
        let mut config = SplitlensConfig::default();
        config.output.formats = vec!["text".to_string()];
        config.charts.width = 800;

        let cli = Cli::try_parse_from(["splitlens"]).unwrap();
        let settings = resolve_settings(&cli, &config).unwrap();

        assert_eq!(settings.formats, vec![OutputFormat::Text]);
        assert_eq!(settings.codec.precision(), 2);
        assert_eq!(settings.charts.map(|c| c.width), Some(800));
    }
}
