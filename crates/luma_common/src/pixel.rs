//! RGB samples and fixed-point channel weights.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The arithmetic right-shift applied after weighting, i.e. the fixed-point
/// scale of the weights (division by 256).
pub const NORM_SHIFT: u32 = 8;

/// The weight sum at which the conversion is exactly normalizing: weights
/// summing to `1 << NORM_SHIFT` map an all-equal input to itself.
pub const NORM_SUM: u32 = 1 << NORM_SHIFT;

/// One RGB input sample, presented to the DUT on a single clock cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Pixel {
    /// Creates a pixel from its three channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A fully saturated white pixel, the worst case for overflow.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The coefficient set: one fixed-point unsigned weight per channel,
/// loaded into the DUT at reset.
///
/// Weights are not required to sum to [`NORM_SUM`]; a sum above it simply
/// makes the weighted sum able to exceed the output width, which the DUT
/// reports through its overflow signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weights {
    /// Red weight.
    pub r: u16,
    /// Green weight.
    pub g: u16,
    /// Blue weight.
    pub b: u16,
}

impl Weights {
    /// Creates a weight set from its three coefficients.
    pub fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// The ITU-R BT.601 luma coefficients scaled to 8 fractional bits.
    /// These sum to 255, one below [`NORM_SUM`], so no input can overflow.
    pub fn bt601() -> Self {
        Self::new(76, 150, 29)
    }

    /// Sum of the three coefficients.
    pub fn sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Whether some input pixel can push the weighted sum past the 8-bit
    /// output range. Equivalent to the all-white pixel overflowing.
    pub fn can_overflow(&self) -> bool {
        (self.sum() * 255) >> NORM_SHIFT > 255
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::bt601()
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
