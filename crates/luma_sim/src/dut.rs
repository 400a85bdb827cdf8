//! Behavioral models of the grayscale pipeline.
//!
//! [`GrayscaleDut`] is a cycle-accurate model of the circuit under
//! verification: a weighted RGB-to-luma converter with a configurable number
//! of pipeline stages, a validity handshake carried alongside the data, and
//! an overflow flag for weighted sums that exceed the 8-bit output.
//!
//! The model doubles as the harness's fault injector: [`DutFault`] selects a
//! deliberate bug (corrupted values, broken handshake timing, a dead output
//! stream) so the checkers can be proven to catch each failure class.

use std::collections::VecDeque;

use crate::bus::{Signal, SignalBus};

/// A clocked device model behind a [`SignalBus`].
pub trait DutModel: SignalBus {
    /// Applies one rising clock edge: registered state updates from the
    /// current input pin values.
    fn rising_edge(&mut self);
}

/// Deliberate bug injected into [`GrayscaleDut`] for checker tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DutFault {
    /// Correct behavior.
    #[default]
    None,
    /// Valid outputs are off by one bit.
    CorruptValue,
    /// `y_valid` is asserted unconditionally, before any sample is accepted.
    ValidStuckHigh,
    /// `y_valid` trails `rgb_valid` by one cycle more than the contract.
    ValidLate,
    /// `y_valid` is never asserted; the output stream is dead.
    NeverValid,
}

/// One pipeline stage's worth of in-flight result.
#[derive(Clone, Copy, Debug, Default)]
struct Stage {
    value: u8,
    valid: bool,
    overflow: bool,
}

/// Cycle-accurate behavioral model of the pipelined grayscale converter.
///
/// Data path: `y = (wr*r + wg*g + wb*b) >> 8`, truncated to 8 bits, with
/// `overflow` flagged when the shifted sum exceeds 255 for a valid sample.
/// The validity bit travels through the same number of stages as the data,
/// so with the default single stage `y_valid` echoes `rgb_valid` one clock
/// edge later.
#[derive(Debug)]
pub struct GrayscaleDut {
    latency: u32,
    fault: DutFault,

    // Input pins, written by the testbench.
    reset: bool,
    r: u8,
    g: u8,
    b: u8,
    rgb_valid: bool,
    wr: u16,
    wg: u16,
    wb: u16,

    // Internal pipeline registers.
    pipe: VecDeque<Stage>,
    late_valid: bool,

    // Output registers.
    y: u8,
    y_valid: bool,
    overflow: bool,
}

impl GrayscaleDut {
    /// Creates a model with the given pipeline depth (rising edges between
    /// a sample on the pins and its result on `y`). Depth 0 is clamped to 1.
    pub fn new(latency: u32) -> Self {
        let latency = latency.max(1);
        Self {
            latency,
            fault: DutFault::None,
            reset: false,
            r: 0,
            g: 0,
            b: 0,
            rgb_valid: false,
            wr: 0,
            wg: 0,
            wb: 0,
            pipe: Self::empty_pipe(latency),
            late_valid: false,
            y: 0,
            y_valid: false,
            overflow: false,
        }
    }

    /// Creates a model with an injected fault.
    pub fn with_fault(latency: u32, fault: DutFault) -> Self {
        let mut dut = Self::new(latency);
        dut.fault = fault;
        dut
    }

    /// The configured pipeline depth.
    pub fn latency(&self) -> u32 {
        self.latency
    }

    /// The stages in flight ahead of the output register.
    fn empty_pipe(latency: u32) -> VecDeque<Stage> {
        let mut pipe = VecDeque::with_capacity(latency as usize);
        pipe.extend(std::iter::repeat(Stage::default()).take(latency as usize - 1));
        pipe
    }

    fn apply_reset(&mut self) {
        self.pipe = Self::empty_pipe(self.latency);
        self.late_valid = false;
        self.y = 0;
        self.y_valid = false;
        self.overflow = false;
    }
}

impl SignalBus for GrayscaleDut {
    fn read(&self, signal: Signal) -> u32 {
        match signal {
            Signal::Reset => self.reset as u32,
            Signal::R => self.r as u32,
            Signal::G => self.g as u32,
            Signal::B => self.b as u32,
            Signal::RgbValid => self.rgb_valid as u32,
            Signal::WeightR => self.wr as u32,
            Signal::WeightG => self.wg as u32,
            Signal::WeightB => self.wb as u32,
            Signal::Y => self.y as u32,
            Signal::YValid => self.y_valid as u32,
            Signal::Overflow => self.overflow as u32,
        }
    }

    fn write(&mut self, signal: Signal, value: u32) {
        match signal {
            Signal::Reset => self.reset = value != 0,
            Signal::R => self.r = value as u8,
            Signal::G => self.g = value as u8,
            Signal::B => self.b = value as u8,
            Signal::RgbValid => self.rgb_valid = value != 0,
            Signal::WeightR => self.wr = value as u16,
            Signal::WeightG => self.wg = value as u16,
            Signal::WeightB => self.wb = value as u16,
            // Output pins ignore testbench writes, as real ports would.
            Signal::Y | Signal::YValid | Signal::Overflow => {}
        }
    }
}

impl DutModel for GrayscaleDut {
    fn rising_edge(&mut self) {
        if self.reset {
            self.apply_reset();
            return;
        }

        let sum = self.wr as u32 * self.r as u32
            + self.wg as u32 * self.g as u32
            + self.wb as u32 * self.b as u32;
        let shifted = sum >> 8;

        let valid_in = match self.fault {
            DutFault::ValidLate => {
                let delayed = self.late_valid;
                self.late_valid = self.rgb_valid;
                delayed
            }
            _ => self.rgb_valid,
        };

        self.pipe.push_back(Stage {
            value: shifted as u8,
            valid: valid_in,
            overflow: shifted > 255 && valid_in,
        });
        // The pop is the output register update.
        let out = self.pipe.pop_front().unwrap_or_default();

        self.y = match self.fault {
            DutFault::CorruptValue if out.valid => out.value ^ 0x01,
            _ => out.value,
        };
        self.y_valid = match self.fault {
            DutFault::ValidStuckHigh => true,
            DutFault::NeverValid => false,
            _ => out.valid,
        };
        self.overflow = out.overflow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive_sample(dut: &mut GrayscaleDut, r: u8, g: u8, b: u8, valid: bool) {
        dut.write(Signal::R, r as u32);
        dut.write(Signal::G, g as u32);
        dut.write(Signal::B, b as u32);
        dut.write_bool(Signal::RgbValid, valid);
        dut.rising_edge();
    }

    fn fresh(latency: u32) -> GrayscaleDut {
        let mut dut = GrayscaleDut::new(latency);
        dut.write(Signal::WeightR, 76);
        dut.write(Signal::WeightG, 150);
        dut.write(Signal::WeightB, 29);
        dut.write_bool(Signal::Reset, true);
        dut.rising_edge();
        dut.write_bool(Signal::Reset, false);
        dut
    }

    #[test]
    fn latency_zero_clamps_to_one() {
        assert_eq!(GrayscaleDut::new(0).latency(), 1);
    }

    #[test]
    fn single_stage_result_after_one_edge() {
        let mut dut = fresh(1);
        drive_sample(&mut dut, 255, 255, 255, true);
        assert!(dut.read_bool(Signal::YValid));
        // (76 + 150 + 29) * 255 >> 8 = 254
        assert_eq!(dut.read(Signal::Y), 254);
        assert!(!dut.read_bool(Signal::Overflow));
    }

    #[test]
    fn idle_cycles_produce_no_valid_output() {
        let mut dut = fresh(1);
        drive_sample(&mut dut, 10, 20, 30, false);
        assert!(!dut.read_bool(Signal::YValid));
    }

    #[test]
    fn two_stage_pipeline_delays_result() {
        let mut dut = fresh(2);
        drive_sample(&mut dut, 100, 0, 0, true);
        assert!(!dut.read_bool(Signal::YValid));
        drive_sample(&mut dut, 0, 0, 0, true);
        assert!(dut.read_bool(Signal::YValid));
        // First sample emerges one edge later: 76 * 100 >> 8 = 29.
        assert_eq!(dut.read(Signal::Y), 29);
    }

    #[test]
    fn overflow_flagged_for_over_unity_weights() {
        let mut dut = fresh(1);
        dut.write(Signal::WeightR, 200);
        dut.write(Signal::WeightG, 200);
        dut.write(Signal::WeightB, 200);
        drive_sample(&mut dut, 255, 255, 255, true);
        assert!(dut.read_bool(Signal::Overflow));
        // The output is the truncated low byte.
        assert_eq!(dut.read(Signal::Y), (200u32 * 255 * 3 >> 8) as u8 as u32);
    }

    #[test]
    fn overflow_not_flagged_for_invalid_sample() {
        let mut dut = fresh(1);
        dut.write(Signal::WeightR, 200);
        dut.write(Signal::WeightG, 200);
        dut.write(Signal::WeightB, 200);
        drive_sample(&mut dut, 255, 255, 255, false);
        assert!(!dut.read_bool(Signal::Overflow));
    }

    #[test]
    fn reset_clears_pipeline() {
        let mut dut = fresh(2);
        drive_sample(&mut dut, 255, 255, 255, true);
        dut.write_bool(Signal::Reset, true);
        dut.rising_edge();
        dut.write_bool(Signal::Reset, false);
        assert!(!dut.read_bool(Signal::YValid));
        assert_eq!(dut.read(Signal::Y), 0);
        drive_sample(&mut dut, 0, 0, 0, false);
        assert!(!dut.read_bool(Signal::YValid));
    }

    #[test]
    fn output_pins_ignore_writes() {
        let mut dut = fresh(1);
        dut.write(Signal::Y, 99);
        dut.write_bool(Signal::YValid, true);
        assert_eq!(dut.read(Signal::Y), 0);
        assert!(!dut.read_bool(Signal::YValid));
    }

    #[test]
    fn corrupt_value_fault_flips_valid_outputs_only() {
        let mut dut = GrayscaleDut::with_fault(1, DutFault::CorruptValue);
        dut.write(Signal::WeightR, 76);
        dut.write(Signal::WeightG, 150);
        dut.write(Signal::WeightB, 29);
        drive_sample(&mut dut, 255, 255, 255, true);
        assert_eq!(dut.read(Signal::Y), 254 ^ 0x01);
        drive_sample(&mut dut, 255, 255, 255, false);
        assert_eq!(dut.read(Signal::Y), 254);
    }

    #[test]
    fn stuck_high_fault_asserts_valid_at_idle() {
        let mut dut = GrayscaleDut::with_fault(1, DutFault::ValidStuckHigh);
        drive_sample(&mut dut, 0, 0, 0, false);
        assert!(dut.read_bool(Signal::YValid));
    }

    #[test]
    fn late_fault_delays_valid_an_extra_edge() {
        let mut dut = GrayscaleDut::with_fault(1, DutFault::ValidLate);
        drive_sample(&mut dut, 0, 0, 0, true);
        assert!(!dut.read_bool(Signal::YValid));
        drive_sample(&mut dut, 0, 0, 0, true);
        assert!(dut.read_bool(Signal::YValid));
    }

    #[test]
    fn never_valid_fault_kills_the_stream() {
        let mut dut = GrayscaleDut::with_fault(1, DutFault::NeverValid);
        for _ in 0..4 {
            drive_sample(&mut dut, 1, 2, 3, true);
            assert!(!dut.read_bool(Signal::YValid));
        }
    }
}
