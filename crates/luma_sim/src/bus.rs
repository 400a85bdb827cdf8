//! Named signal access to the device under test.
//!
//! [`SignalBus`] is the seam between the verification core and whatever
//! provides the circuit: the behavioral models in [`crate::dut`] implement
//! it directly, and a cosimulation backend could implement it against a real
//! simulator without touching the checkers.

use std::fmt;

/// The logical signals of the grayscale pipeline interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Synchronous reset, active high.
    Reset,
    /// Red input channel (8 bits).
    R,
    /// Green input channel (8 bits).
    G,
    /// Blue input channel (8 bits).
    B,
    /// Input handshake: the RGB channels carry a sample this cycle.
    RgbValid,
    /// Red weight register (loaded at reset).
    WeightR,
    /// Green weight register.
    WeightG,
    /// Blue weight register.
    WeightB,
    /// Luma output (8 bits).
    Y,
    /// Output handshake: `Y` carries a result this cycle.
    YValid,
    /// Weighted sum exceeded the output width for a valid sample.
    Overflow,
}

impl Signal {
    /// The signal's name as it would appear in a waveform.
    pub fn name(self) -> &'static str {
        match self {
            Signal::Reset => "reset",
            Signal::R => "r",
            Signal::G => "g",
            Signal::B => "b",
            Signal::RgbValid => "rgb_valid",
            Signal::WeightR => "wr",
            Signal::WeightG => "wg",
            Signal::WeightB => "wb",
            Signal::Y => "y",
            Signal::YValid => "y_valid",
            Signal::Overflow => "overflow",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read/write access to the DUT's named signals.
///
/// Values are exchanged as `u32` regardless of a signal's width; writes
/// truncate to the signal's width and reads zero-extend. Single-bit signals
/// read as 0 or 1.
pub trait SignalBus {
    /// Reads the current value of a signal.
    fn read(&self, signal: Signal) -> u32;

    /// Drives a signal to a new value, effective immediately.
    fn write(&mut self, signal: Signal, value: u32);

    /// Reads a single-bit signal as a boolean.
    fn read_bool(&self, signal: Signal) -> bool {
        self.read(signal) != 0
    }

    /// Drives a single-bit signal from a boolean.
    fn write_bool(&mut self, signal: Signal, value: bool) {
        self.write(signal, value as u32);
    }
}
