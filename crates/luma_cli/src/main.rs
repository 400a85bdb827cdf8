//! Luma CLI — the command-line interface for the grayscale verification harness.
//!
//! Provides `luma run` for streaming an image through the pipelined DUT model
//! under full checking, and `luma check-weights` for auditing a weight set
//! before committing it to hardware registers.

#![warn(missing_docs)]

mod run;
mod weights;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Luma — cycle-accurate verification for the grayscale pixel pipeline.
#[derive(Parser, Debug)]
#[command(name = "luma", version, about = "Luma grayscale pipeline verifier")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `luma.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stream an image through the DUT model under full checking.
    Run(RunArgs),
    /// Audit a weight set for normalization and overflow headroom.
    CheckWeights(WeightArgs),
}

/// Arguments for the `luma run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Input image path (plain or raw PPM). Overrides the configuration.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output path for the grayscale result (raw PGM).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Stride divisor applied before streaming. Overrides the configuration.
    #[arg(long)]
    pub scale: Option<u32>,

    /// DUT pipeline latency in cycles. Overrides the configuration.
    #[arg(long)]
    pub latency: Option<u32>,
}

/// Arguments for the `luma check-weights` subcommand.
#[derive(Parser, Debug)]
pub struct WeightArgs {
    /// Red channel weight.
    #[arg(short, long)]
    pub r: u16,

    /// Green channel weight.
    #[arg(short, long)]
    pub g: u16,

    /// Blue channel weight.
    #[arg(short, long)]
    pub b: u16,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::CheckWeights(ref args) => weights::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
