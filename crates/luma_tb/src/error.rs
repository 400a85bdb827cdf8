//! Verification failure taxonomy.
//!
//! Every checker failure is fatal: a single mismatch invalidates the run,
//! so there is no retry or partial-success path. Each variant carries the
//! diagnostic values a reader needs to localize the bug without rerunning.

use luma_common::GridError;
use luma_sim::{SimError, SimTime};

/// A fatal verification failure or harness setup error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TbError {
    /// `y_valid` did not echo `rgb_valid` with the contracted delay.
    #[error("handshake mismatch at {time}: y_valid is {actual}, expected {expected}")]
    HandshakeMismatch {
        /// The `rgb_valid` value the output handshake should echo.
        expected: bool,
        /// The `y_valid` value actually observed.
        actual: bool,
        /// When the mismatch was observed.
        time: SimTime,
    },

    /// The DUT's output disagrees with the reference model.
    #[error("value mismatch at {time}: DUT produced {actual}, model expects {expected}")]
    ValueMismatch {
        /// The reference model's value for the aligned input sample.
        expected: u32,
        /// The DUT's reported output.
        actual: u32,
        /// When the mismatch was observed.
        time: SimTime,
    },

    /// The overflow signal was asserted. Unconditional and non-recoverable.
    #[error("overflow asserted at {time}")]
    Overflow {
        /// When the assertion was observed.
        time: SimTime,
    },

    /// The output stream stopped making progress.
    #[error(
        "output stalled at position {position} of {expected} ({idle_cycles} cycles without y_valid)"
    )]
    StallTimeout {
        /// The next result position awaiting a value.
        position: usize,
        /// The expected final result count.
        expected: usize,
        /// Consecutive cycles observed without a valid output.
        idle_cycles: u32,
    },

    /// The reconstructed result does not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The cycle kernel rejected its configuration.
    #[error(transparent)]
    Sim(#[from] SimError),
}
