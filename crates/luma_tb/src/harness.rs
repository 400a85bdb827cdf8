//! The test orchestrator: reset, concurrent observers, stimulus, drain,
//! finalize.

use luma_common::{LumaGrid, PixelGrid, Weights};
use luma_sim::{CycleKernel, DutModel, Signal, SignalBus, SimTime, TbTask};

use crate::builder::OutputBuilder;
use crate::checkers::{HandshakeChecker, OverflowMonitor, ValueChecker};
use crate::driver::StimulusDriver;
use crate::error::TbError;

/// Parameters for one verification run.
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    /// Channel weights loaded into the DUT at reset.
    pub weights: Weights,
    /// The DUT's pipeline latency in clock cycles.
    pub latency: u32,
    /// Clock period in femtoseconds.
    pub period_fs: u64,
    /// Extra cycles run after the result is complete, with all checkers
    /// still observing, to confirm the output stream goes quiet.
    pub drain_cycles: u32,
    /// Consecutive output-idle cycles tolerated before declaring a stall.
    pub stall_limit: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            weights: Weights::bt601(),
            latency: 1,
            period_fs: 10 * luma_sim::time::FS_PER_NS,
            drain_cycles: 2,
            stall_limit: 1024,
        }
    }
}

/// The outcome of a passing verification run.
#[derive(Clone, Debug)]
pub struct TbReport {
    /// The reconstructed grayscale result.
    pub grid: LumaGrid,
    /// Total clock cycles simulated, including reset and drain.
    pub cycles: u64,
    /// Simulated time when the run finished.
    pub final_time: SimTime,
}

/// Runs the full verification sequence against a DUT.
///
/// Applies the reset sequence, then runs the stimulus driver alongside the
/// handshake checker, overflow monitor, value checker, and output builder
/// until the result grid is complete, and finally drains
/// `latency + drain_cycles` extra cycles with the checkers still attached.
/// The first checker failure aborts everything; there is no partial result.
pub fn verify<D: DutModel>(
    dut: &mut D,
    image: &PixelGrid,
    opts: &RunOptions,
) -> Result<TbReport, TbError> {
    let mut kernel = CycleKernel::new(opts.period_fs)?;

    // Reset window: one full cycle with reset held, inputs quiet, weights
    // on the configuration pins.
    dut.write_bool(Signal::Reset, true);
    dut.write_bool(Signal::RgbValid, false);
    dut.write(Signal::R, 0);
    dut.write(Signal::G, 0);
    dut.write(Signal::B, 0);
    dut.write(Signal::WeightR, opts.weights.r as u32);
    dut.write(Signal::WeightG, opts.weights.g as u32);
    dut.write(Signal::WeightB, opts.weights.b as u32);
    kernel.cycle::<_, TbError>(dut, &mut [])?;
    dut.write_bool(Signal::Reset, false);

    let mut driver = StimulusDriver::from_grid(image);
    let mut handshake = HandshakeChecker::new(opts.latency);
    let mut overflow = OverflowMonitor::new();
    let mut values = ValueChecker::new(opts.latency);
    let mut builder = OutputBuilder::new(image.width(), image.height(), opts.stall_limit);

    // The overflow monitor is ordered ahead of the value checker so that an
    // overflowing cycle reports Overflow, not the truncation mismatch.
    while !builder.is_complete() {
        let mut tasks: [&mut dyn TbTask<TbError>; 5] = [
            &mut driver,
            &mut handshake,
            &mut overflow,
            &mut values,
            &mut builder,
        ];
        kernel.cycle(dut, &mut tasks)?;
    }

    for _ in 0..opts.latency + opts.drain_cycles {
        let mut tasks: [&mut dyn TbTask<TbError>; 4] =
            [&mut driver, &mut handshake, &mut overflow, &mut values];
        kernel.cycle(dut, &mut tasks)?;
    }

    Ok(TbReport {
        grid: builder.finish()?,
        cycles: kernel.cycles(),
        final_time: kernel.time(),
    })
}
