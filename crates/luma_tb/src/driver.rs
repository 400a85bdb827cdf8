//! The stimulus driver: one sample per clock cycle, valid for exactly the
//! duration of the stream.

use luma_common::{Pixel, PixelGrid};
use luma_sim::{Signal, SignalBus, SimTime, TbTask};

use crate::error::TbError;

/// Feeds an ordered sample sequence into the DUT.
///
/// On each falling edge the driver places the next sample on the channel
/// pins with `rgb_valid` asserted; one falling edge after the last sample it
/// deasserts `rgb_valid` and zeroes the channels, then idles. An empty
/// sequence produces zero cycles of assertion.
#[derive(Debug)]
pub struct StimulusDriver {
    samples: std::vec::IntoIter<Pixel>,
    driven: usize,
    done: bool,
}

impl StimulusDriver {
    /// Creates a driver over an explicit sample sequence.
    pub fn new(samples: Vec<Pixel>) -> Self {
        Self {
            samples: samples.into_iter(),
            driven: 0,
            done: false,
        }
    }

    /// Creates a driver over a grid's pixels in row-major order.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        Self::new(grid.iter().collect())
    }

    /// Number of samples driven so far.
    pub fn driven(&self) -> usize {
        self.driven
    }

    /// Whether the stream has ended and `rgb_valid` has been deasserted.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl TbTask<TbError> for StimulusDriver {
    fn name(&self) -> &'static str {
        "stimulus_driver"
    }

    fn drive(&mut self, bus: &mut dyn SignalBus, _time: SimTime) -> Result<(), TbError> {
        match self.samples.next() {
            Some(pixel) => {
                bus.write(Signal::R, pixel.r as u32);
                bus.write(Signal::G, pixel.g as u32);
                bus.write(Signal::B, pixel.b as u32);
                bus.write_bool(Signal::RgbValid, true);
                self.driven += 1;
            }
            None => {
                if !self.done {
                    bus.write_bool(Signal::RgbValid, false);
                    bus.write(Signal::R, 0);
                    bus.write(Signal::G, 0);
                    bus.write(Signal::B, 0);
                    self.done = true;
                }
            }
        }
        Ok(())
    }
}
