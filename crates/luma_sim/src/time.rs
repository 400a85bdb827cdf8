//! Simulated time with femtosecond precision and settle-step ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Femtoseconds per picosecond.
pub const FS_PER_PS: u64 = 1_000;
/// Femtoseconds per nanosecond.
pub const FS_PER_NS: u64 = 1_000_000;
/// Femtoseconds per microsecond.
pub const FS_PER_US: u64 = 1_000_000_000;

/// A point in simulated time.
///
/// `fs` is the wall-clock simulation timestamp; `settle` orders the
/// zero-duration sub-steps within one timestamp (a clock edge happens at
/// settle 0, the stable-read window of the same edge at settle 1). Ordering
/// is by timestamp first, then settle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimTime {
    /// Simulation timestamp in femtoseconds.
    pub fs: u64,
    /// Zero-duration sub-step index within this timestamp.
    pub settle: u32,
}

impl SimTime {
    /// Time zero.
    pub const ZERO: SimTime = SimTime { fs: 0, settle: 0 };

    /// A time point at the given femtosecond timestamp, settle step 0.
    pub fn from_fs(fs: u64) -> Self {
        Self { fs, settle: 0 }
    }

    /// A time point at the given nanosecond timestamp, settle step 0.
    pub fn from_ns(ns: u64) -> Self {
        Self::from_fs(ns * FS_PER_NS)
    }

    /// The same timestamp one settle step later.
    pub fn settled(self) -> Self {
        Self {
            fs: self.fs,
            settle: self.settle + 1,
        }
    }

    /// A later timestamp, settle step reset to 0.
    pub fn plus_fs(self, fs: u64) -> Self {
        Self {
            fs: self.fs + fs,
            settle: 0,
        }
    }

    /// The timestamp in whole nanoseconds (truncated).
    pub fn as_ns(self) -> u64 {
        self.fs / FS_PER_NS
    }
}

impl Default for SimTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fs, self.settle).cmp(&(other.fs, other.settle))
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fs = self.fs;
        if fs > 0 && fs % FS_PER_US == 0 {
            write!(f, "{} us", fs / FS_PER_US)?;
        } else if fs > 0 && fs % FS_PER_NS == 0 {
            write!(f, "{} ns", fs / FS_PER_NS)?;
        } else if fs > 0 && fs % FS_PER_PS == 0 {
            write!(f, "{} ps", fs / FS_PER_PS)?;
        } else {
            write!(f, "{fs} fs")?;
        }
        if self.settle > 0 {
            write!(f, " (+{})", self.settle)?;
        }
        Ok(())
    }
}
