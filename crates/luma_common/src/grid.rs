//! Rectangular row-major grids of pixels and luma values.
//!
//! [`PixelGrid`] holds the RGB input image fed to the DUT; [`LumaGrid`] holds
//! the single-channel result reassembled from the DUT's output stream.

use serde::{Deserialize, Serialize};

use crate::pixel::Pixel;

/// Errors constructing or indexing a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// A grid dimension was zero.
    #[error("grid dimensions must be nonzero, got {width}x{height}")]
    EmptyDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The backing buffer length does not match width * height.
    #[error("buffer length {len} does not match {width}x{height}")]
    LengthMismatch {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Actual buffer length.
        len: usize,
    },

    /// A downscale divisor of zero was requested.
    #[error("downscale divisor must be nonzero")]
    ZeroDivisor,
}

/// A rectangular, row-major grid of RGB pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Creates a grid from a row-major pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, GridError> {
        check_dimensions(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a grid by evaluating `f(x, y)` for every position.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Pixel,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimension { width, height });
        }
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Grid width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the grid holds no pixels. Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixel at column `x`, row `y`. Panics when out of range.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        self.pixels[(y * self.width + x) as usize]
    }

    /// Iterates pixels in row-major (stimulus) order.
    pub fn iter(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.pixels.iter().copied()
    }

    /// Downscales by taking every `divisor`-th pixel in both directions,
    /// starting at the origin. A divisor of 1 returns the grid unchanged.
    pub fn downscale(&self, divisor: u32) -> Result<Self, GridError> {
        if divisor == 0 {
            return Err(GridError::ZeroDivisor);
        }
        if divisor == 1 {
            return Ok(self.clone());
        }
        let width = (self.width / divisor).max(1);
        let height = (self.height / divisor).max(1);
        Self::from_fn(width, height, |x, y| self.get(x * divisor, y * divisor))
    }
}

/// A rectangular, row-major grid of single-channel luma values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumaGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LumaGrid {
    /// Creates a grid from a row-major value buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, GridError> {
        check_dimensions(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The value at column `x`, row `y`. Panics when out of range.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        self.data[(y * self.width + x) as usize]
    }

    /// The row-major value buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn check_dimensions(width: u32, height: u32, len: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyDimension { width, height });
    }
    if len != (width as usize) * (height as usize) {
        return Err(GridError::LengthMismatch { width, height, len });
    }
    Ok(())
}
