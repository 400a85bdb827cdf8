//! The output reconstructor: reassembles the validity-gated output stream
//! into a complete grid.

use luma_common::LumaGrid;
use luma_sim::{Signal, SignalBus, SimTime, TbTask};

use crate::error::TbError;

/// Collects valid output values into a row-major result buffer.
///
/// After each rising edge the builder samples `y_valid`: when asserted, the
/// output value is appended at the cursor and the cursor advances; when not,
/// the same position is retried on the next cycle. Gaps of any length in
/// the output stream therefore never shift positions. The builder is the
/// sole writer of the result buffer.
///
/// A stall guard bounds how long the builder tolerates no progress: a DUT
/// that stops producing valid outputs fails the run with
/// [`TbError::StallTimeout`] instead of hanging it.
#[derive(Debug)]
pub struct OutputBuilder {
    width: u32,
    height: u32,
    data: Vec<u8>,
    stall_limit: u32,
    idle_cycles: u32,
}

impl OutputBuilder {
    /// Creates a builder for a `width` x `height` result with the given
    /// stall limit in cycles.
    pub fn new(width: u32, height: u32, stall_limit: u32) -> Self {
        Self {
            width,
            height,
            data: Vec::with_capacity((width * height) as usize),
            stall_limit,
            idle_cycles: 0,
        }
    }

    /// The expected number of result values.
    pub fn expected(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// The number of values collected so far.
    pub fn collected(&self) -> usize {
        self.data.len()
    }

    /// Whether every expected position has been filled.
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.expected()
    }

    /// Finalizes the result into a grid. Fails if positions are missing.
    pub fn finish(self) -> Result<LumaGrid, TbError> {
        Ok(LumaGrid::from_raw(self.width, self.height, self.data)?)
    }
}

impl TbTask<TbError> for OutputBuilder {
    fn name(&self) -> &'static str {
        "output_builder"
    }

    fn sample_rising(&mut self, bus: &dyn SignalBus, _time: SimTime) -> Result<(), TbError> {
        if self.is_complete() {
            return Ok(());
        }
        if bus.read_bool(Signal::YValid) {
            self.data.push(bus.read(Signal::Y) as u8);
            self.idle_cycles = 0;
            return Ok(());
        }
        self.idle_cycles += 1;
        if self.idle_cycles >= self.stall_limit {
            return Err(TbError::StallTimeout {
                position: self.data.len(),
                expected: self.expected(),
                idle_cycles: self.idle_cycles,
            });
        }
        Ok(())
    }
}
