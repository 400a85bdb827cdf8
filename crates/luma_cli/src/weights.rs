//! `luma check-weights` — audit a weight set before loading it.
//!
//! Reports whether the weights sum to the normalization constant and whether
//! a worst-case all-white input can overflow the 8-bit output.

use luma_common::{Weights, NORM_SHIFT, NORM_SUM};

use crate::{GlobalArgs, ReportFormat, WeightArgs};

/// Runs the `luma check-weights` command.
///
/// Returns exit code 0 when the weights cannot overflow, 1 otherwise. An
/// off-unity sum is reported but is not by itself a failure.
pub fn run(args: &WeightArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let weights = Weights::new(args.r, args.g, args.b);
    let report = audit(&weights);

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => {
            if !global.quiet {
                println!(
                    "weights {}/{}/{}: sum {} ({})",
                    weights.r, weights.g, weights.b, report.sum, report.balance
                );
                println!("worst-case output: {}", report.worst_case);
                if report.can_overflow {
                    println!("FAIL: all-white input overflows 8 bits");
                } else {
                    println!("PASS: no input can overflow");
                }
            }
        }
    }

    Ok(if report.can_overflow { 1 } else { 0 })
}

/// The outcome of a weight audit.
#[derive(Debug, serde::Serialize)]
pub struct WeightReport {
    /// Sum of the three weights.
    pub sum: u32,
    /// How the sum relates to the normalization constant.
    pub balance: Balance,
    /// The widest value any input can produce, before truncation.
    pub worst_case: u32,
    /// Whether any input can exceed 8 bits.
    pub can_overflow: bool,
}

/// How a weight sum relates to the normalization constant.
#[derive(Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    /// The sum is exactly the normalization constant.
    Unity,
    /// The sum falls short: the output range is compressed.
    Under,
    /// The sum exceeds it: some inputs may overflow.
    Over,
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Balance::Unity => write!(f, "unity"),
            Balance::Under => write!(f, "under unity"),
            Balance::Over => write!(f, "over unity"),
        }
    }
}

fn audit(weights: &Weights) -> WeightReport {
    let sum = weights.sum();
    let balance = match sum.cmp(&NORM_SUM) {
        std::cmp::Ordering::Equal => Balance::Unity,
        std::cmp::Ordering::Less => Balance::Under,
        std::cmp::Ordering::Greater => Balance::Over,
    };
    WeightReport {
        sum,
        balance,
        worst_case: (sum * 255) >> NORM_SHIFT,
        can_overflow: weights.can_overflow(),
    }
}
