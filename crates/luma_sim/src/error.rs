//! Kernel construction errors.

/// Errors configuring the cycle kernel.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimError {
    /// The clock period was zero.
    #[error("clock period must be nonzero")]
    ZeroClockPeriod,

    /// The clock period cannot be split into two equal half-cycles.
    #[error("clock period {period_fs} fs is not divisible into half-cycles")]
    OddClockPeriod {
        /// The rejected period in femtoseconds.
        period_fs: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_zero_period() {
        assert_eq!(
            SimError::ZeroClockPeriod.to_string(),
            "clock period must be nonzero"
        );
    }

    #[test]
    fn display_odd_period() {
        assert_eq!(
            SimError::OddClockPeriod { period_fs: 3 }.to_string(),
            "clock period 3 fs is not divisible into half-cycles"
        );
    }
}
