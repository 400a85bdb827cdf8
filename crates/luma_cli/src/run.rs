//! `luma run` — stream an image through the DUT model under full checking.
//!
//! Loads the configuration and input image, downscales by the stride divisor,
//! runs the harness against the behavioral pipeline model, and writes the
//! reconstructed grayscale result. All checkers are armed; the first failure
//! aborts the run with a nonzero exit code.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use luma_common::Weights;
use luma_config::RunConfig;
use luma_sim::GrayscaleDut;
use luma_tb::{verify, RunOptions, TbError};

use crate::{GlobalArgs, RunArgs};

/// Runs the `luma run` command.
///
/// Returns exit code 0 when every check passes, 1 on a checker failure.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_run_config(global)?;

    let input = match (&args.input, &config) {
        (Some(path), _) => path.clone(),
        (None, Some(cfg)) => cfg.image.input.clone(),
        (None, None) => return Err("no input image: pass --input or provide luma.toml".into()),
    };

    let scaling = args
        .scale
        .or_else(|| config.as_ref().map(|c| c.image.scaling))
        .unwrap_or(1);
    if scaling == 0 {
        return Err("--scale must be at least 1".into());
    }

    let weights = match &config {
        Some(cfg) => Weights::new(cfg.weights.r, cfg.weights.g, cfg.weights.b),
        None => Weights::bt601(),
    };

    let mut opts = RunOptions {
        weights,
        ..RunOptions::default()
    };
    if let Some(cfg) = &config {
        opts.latency = cfg.pipeline.latency;
        opts.drain_cycles = cfg.pipeline.drain_cycles;
        opts.stall_limit = cfg.pipeline.stall_limit;
        opts.period_fs = luma_config::parse_period(&cfg.clock.period)?;
    }
    if let Some(latency) = args.latency {
        if latency == 0 {
            return Err("--latency must be at least 1".into());
        }
        opts.latency = latency;
    }

    let image = luma_common::read_ppm(File::open(&input)?)?;
    let image = image.downscale(scaling)?;

    if !global.quiet {
        eprintln!(
            "   Streaming {}x{} pixels ({input})",
            image.width(),
            image.height()
        );
    }
    if global.verbose {
        eprintln!(
            "   weights {}/{}/{}  latency {}  period {} fs",
            opts.weights.r, opts.weights.g, opts.weights.b, opts.latency, opts.period_fs
        );
    }

    let mut dut = GrayscaleDut::new(opts.latency);
    let report = match verify(&mut dut, &image, &opts) {
        Ok(report) => report,
        Err(e @ (TbError::Grid(_) | TbError::Sim(_))) => return Err(e.into()),
        Err(e) => {
            eprintln!("FAIL: {e}");
            return Ok(1);
        }
    };

    if let Some(output) = &args.output {
        let file = BufWriter::new(File::create(Path::new(output))?);
        luma_common::write_pgm(&report.grid, file)?;
        if !global.quiet {
            eprintln!("   Wrote {output}");
        }
    }

    if !global.quiet {
        println!(
            "PASS: {} pixels verified in {} cycles ({})",
            report.grid.data().len(),
            report.cycles,
            report.final_time
        );
    }
    Ok(0)
}

fn load_run_config(global: &GlobalArgs) -> Result<Option<RunConfig>, Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) => Ok(Some(luma_config::load_config(Path::new(path))?)),
        None => {
            let default = Path::new("luma.toml");
            if default.is_file() {
                Ok(Some(luma_config::load_config(default)?))
            } else {
                Ok(None)
            }
        }
    }
}
