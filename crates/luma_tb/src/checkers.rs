//! Concurrent observers: handshake checker, value checker, overflow monitor.
//!
//! All three sample the bus only at the kernel's stable phases and never
//! write it. Each runs until the harness stops resuming it; a violation is
//! returned as a fatal [`TbError`] that aborts the whole run.

use luma_common::Pixel;
use luma_sim::{Signal, SignalBus, SimTime, TbTask};

use crate::delay::DelayLine;
use crate::error::TbError;
use crate::model::expected_luma;

/// Verifies that `y_valid` echoes `rgb_valid` through the pipeline.
///
/// `rgb_valid` is captured in the settled window after each falling edge;
/// after the following rising edge, `y_valid` must equal the capture from
/// `latency` edges back. With the contract latency of 1 this is the pure
/// one-cycle echo: what was accepted on this cycle's falling edge must be
/// answered on this cycle's rising edge.
#[derive(Debug)]
pub struct HandshakeChecker {
    line: DelayLine<bool>,
    pending: Option<bool>,
}

impl HandshakeChecker {
    /// Creates a checker for the given pipeline latency (min 1).
    pub fn new(latency: u32) -> Self {
        Self {
            line: DelayLine::new(latency.max(1) as usize - 1),
            pending: None,
        }
    }
}

impl TbTask<TbError> for HandshakeChecker {
    fn name(&self) -> &'static str {
        "handshake_checker"
    }

    fn sample_falling(&mut self, bus: &dyn SignalBus, _time: SimTime) -> Result<(), TbError> {
        self.pending = self.line.push(bus.read_bool(Signal::RgbValid));
        Ok(())
    }

    fn sample_rising(&mut self, bus: &dyn SignalBus, time: SimTime) -> Result<(), TbError> {
        let actual = bus.read_bool(Signal::YValid);
        match self.pending.take() {
            Some(expected) if expected != actual => Err(TbError::HandshakeMismatch {
                expected,
                actual,
                time,
            }),
            // While the line is still priming, nothing may come out yet.
            None if actual => Err(TbError::HandshakeMismatch {
                expected: false,
                actual,
                time,
            }),
            _ => Ok(()),
        }
    }
}

/// Verifies every valid output value against the reference model.
///
/// Input channels are captured in the settled window after each falling
/// edge, every cycle regardless of validity, and travel through a delay
/// line so the comparison after the rising edge is always against the
/// sample the pipeline actually consumed. Reading the pins directly at
/// check time instead is the canonical off-by-one: it happens to work at
/// latency 1, where the falling-edge capture and the pins agree, and
/// silently misaligns on anything deeper.
#[derive(Debug)]
pub struct ValueChecker {
    line: DelayLine<Pixel>,
    pending: Option<Pixel>,
}

impl ValueChecker {
    /// Creates a checker for the given pipeline latency (min 1).
    pub fn new(latency: u32) -> Self {
        Self {
            line: DelayLine::new(latency.max(1) as usize - 1),
            pending: None,
        }
    }
}

impl TbTask<TbError> for ValueChecker {
    fn name(&self) -> &'static str {
        "value_checker"
    }

    fn sample_falling(&mut self, bus: &dyn SignalBus, _time: SimTime) -> Result<(), TbError> {
        let pixel = Pixel::new(
            bus.read(Signal::R) as u8,
            bus.read(Signal::G) as u8,
            bus.read(Signal::B) as u8,
        );
        self.pending = self.line.push(pixel);
        Ok(())
    }

    fn sample_rising(&mut self, bus: &dyn SignalBus, time: SimTime) -> Result<(), TbError> {
        if !bus.read_bool(Signal::YValid) {
            return Ok(());
        }
        // A valid output before the delay line is primed is a handshake
        // violation; leave that verdict to the handshake checker.
        let Some(pixel) = self.pending.take() else {
            return Ok(());
        };
        let weights = luma_common::Weights::new(
            bus.read(Signal::WeightR) as u16,
            bus.read(Signal::WeightG) as u16,
            bus.read(Signal::WeightB) as u16,
        );
        let expected = expected_luma(pixel, weights);
        let actual = bus.read(Signal::Y);
        if actual != expected {
            return Err(TbError::ValueMismatch {
                expected,
                actual,
                time,
            });
        }
        Ok(())
    }
}

/// Fails the run the moment the overflow signal is asserted.
#[derive(Debug, Default)]
pub struct OverflowMonitor;

impl OverflowMonitor {
    /// Creates the monitor.
    pub fn new() -> Self {
        Self
    }

    fn check(bus: &dyn SignalBus, time: SimTime) -> Result<(), TbError> {
        if bus.read_bool(Signal::Overflow) {
            return Err(TbError::Overflow { time });
        }
        Ok(())
    }
}

impl TbTask<TbError> for OverflowMonitor {
    fn name(&self) -> &'static str {
        "overflow_monitor"
    }

    fn sample_falling(&mut self, bus: &dyn SignalBus, time: SimTime) -> Result<(), TbError> {
        Self::check(bus, time)
    }

    fn sample_rising(&mut self, bus: &dyn SignalBus, time: SimTime) -> Result<(), TbError> {
        Self::check(bus, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::StimulusDriver;
    use luma_sim::{CycleKernel, DutFault, GrayscaleDut};

    fn weighted_dut(latency: u32, fault: DutFault) -> GrayscaleDut {
        let mut dut = GrayscaleDut::with_fault(latency, fault);
        dut.write(Signal::WeightR, 76);
        dut.write(Signal::WeightG, 150);
        dut.write(Signal::WeightB, 29);
        dut
    }

    fn samples() -> Vec<Pixel> {
        // Consecutive samples differ so misalignment cannot pass by luck.
        vec![
            Pixel::new(255, 255, 255),
            Pixel::new(0, 0, 0),
            Pixel::new(128, 64, 32),
            Pixel::new(10, 20, 30),
        ]
    }

    /// Drives `samples()` through `dut` with the given checker attached and
    /// returns the first error, if any.
    fn run_checked(
        dut: &mut GrayscaleDut,
        checker: &mut dyn TbTask<TbError>,
        cycles: usize,
    ) -> Result<(), TbError> {
        let mut kernel = CycleKernel::new(10_000_000).unwrap();
        let mut driver = StimulusDriver::new(samples());
        for _ in 0..cycles {
            let mut tasks: [&mut dyn TbTask<TbError>; 2] = [&mut driver, checker];
            kernel.cycle(dut, &mut tasks)?;
        }
        Ok(())
    }

    #[test]
    fn handshake_passes_on_correct_dut() {
        let mut dut = weighted_dut(1, DutFault::None);
        let mut checker = HandshakeChecker::new(1);
        run_checked(&mut dut, &mut checker, 8).unwrap();
    }

    #[test]
    fn handshake_catches_premature_valid() {
        let mut dut = weighted_dut(1, DutFault::ValidStuckHigh);
        let mut checker = HandshakeChecker::new(1);
        let err = run_checked(&mut dut, &mut checker, 8).unwrap_err();
        assert!(matches!(
            err,
            TbError::HandshakeMismatch {
                expected: false,
                actual: true,
                ..
            }
        ));
    }

    #[test]
    fn handshake_catches_late_valid() {
        let mut dut = weighted_dut(1, DutFault::ValidLate);
        let mut checker = HandshakeChecker::new(1);
        let err = run_checked(&mut dut, &mut checker, 8).unwrap_err();
        assert!(matches!(
            err,
            TbError::HandshakeMismatch {
                expected: true,
                actual: false,
                ..
            }
        ));
    }

    #[test]
    fn handshake_tracks_deeper_pipelines() {
        let mut dut = weighted_dut(3, DutFault::None);
        let mut checker = HandshakeChecker::new(3);
        run_checked(&mut dut, &mut checker, 10).unwrap();
    }

    #[test]
    fn values_pass_on_correct_dut() {
        let mut dut = weighted_dut(1, DutFault::None);
        let mut checker = ValueChecker::new(1);
        run_checked(&mut dut, &mut checker, 8).unwrap();
    }

    #[test]
    fn values_catch_corrupt_dut() {
        let mut dut = weighted_dut(1, DutFault::CorruptValue);
        let mut checker = ValueChecker::new(1);
        let err = run_checked(&mut dut, &mut checker, 8).unwrap_err();
        assert!(matches!(err, TbError::ValueMismatch { .. }));
    }

    #[test]
    fn values_align_at_latency_two() {
        let mut dut = weighted_dut(2, DutFault::None);
        let mut checker = ValueChecker::new(2);
        run_checked(&mut dut, &mut checker, 10).unwrap();
    }

    #[test]
    fn misconfigured_lookback_is_caught_not_masked() {
        // The canonical bug: comparing a two-stage pipeline against the
        // current cycle's inputs. With distinct consecutive samples the
        // mismatch surfaces on the first valid output.
        let mut dut = weighted_dut(2, DutFault::None);
        let mut checker = ValueChecker::new(1);
        let err = run_checked(&mut dut, &mut checker, 10).unwrap_err();
        assert!(matches!(err, TbError::ValueMismatch { .. }));
    }

    #[test]
    fn overflow_monitor_quiet_on_safe_weights() {
        let mut dut = weighted_dut(1, DutFault::None);
        let mut monitor = OverflowMonitor::new();
        run_checked(&mut dut, &mut monitor, 8).unwrap();
    }

    #[test]
    fn overflow_monitor_fires_on_over_unity_weights() {
        let mut dut = weighted_dut(1, DutFault::None);
        dut.write(Signal::WeightR, 200);
        dut.write(Signal::WeightG, 200);
        dut.write(Signal::WeightB, 200);
        let mut monitor = OverflowMonitor::new();
        let err = run_checked(&mut dut, &mut monitor, 8).unwrap_err();
        assert!(matches!(err, TbError::Overflow { .. }));
    }
}
