//! Netpbm image reading and writing.
//!
//! The harness consumes RGB input as PPM (`P3` plain or `P6` raw) and emits
//! its grayscale result as raw PGM (`P5`). Only the 8-bit `maxval = 255`
//! variants are supported; anything else is rejected rather than rescaled.

use std::io::{Read, Write};

use crate::grid::{GridError, LumaGrid, PixelGrid};
use crate::pixel::Pixel;

/// Errors reading or writing netpbm images.
#[derive(Debug, thiserror::Error)]
pub enum NetpbmError {
    /// Underlying I/O failure.
    #[error("netpbm I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with a supported magic number.
    #[error("unsupported netpbm magic '{0}' (expected P3 or P6)")]
    BadMagic(String),

    /// A header field is missing or not a number.
    #[error("malformed netpbm header: {reason}")]
    BadHeader {
        /// What was wrong with the header.
        reason: String,
    },

    /// The maxval is not 255.
    #[error("unsupported maxval {0} (only 255 is supported)")]
    BadMaxval(u32),

    /// The pixel data ended early or contained an out-of-range sample.
    #[error("malformed netpbm pixel data: {reason}")]
    BadData {
        /// What was wrong with the data.
        reason: String,
    },

    /// The parsed dimensions do not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Reads a PPM image (`P3` or `P6`) into a [`PixelGrid`].
pub fn read_ppm(mut reader: impl Read) -> Result<PixelGrid, NetpbmError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut cursor = Cursor::new(&bytes);
    let magic = cursor.token()?;
    let raw = match magic.as_str() {
        "P3" => false,
        "P6" => true,
        other => return Err(NetpbmError::BadMagic(other.to_string())),
    };

    let width = cursor.number("width")?;
    let height = cursor.number("height")?;
    let maxval = cursor.number("maxval")?;
    if maxval != 255 {
        return Err(NetpbmError::BadMaxval(maxval));
    }

    let count = (width as usize) * (height as usize);
    let mut pixels = Vec::with_capacity(count);
    if raw {
        // Exactly one whitespace byte separates the header from raw data.
        cursor.skip_single_whitespace()?;
        let data = cursor.rest();
        if data.len() < count * 3 {
            return Err(NetpbmError::BadData {
                reason: format!("expected {} bytes, found {}", count * 3, data.len()),
            });
        }
        for chunk in data[..count * 3].chunks_exact(3) {
            pixels.push(Pixel::new(chunk[0], chunk[1], chunk[2]));
        }
    } else {
        for _ in 0..count {
            let r = cursor.sample()?;
            let g = cursor.sample()?;
            let b = cursor.sample()?;
            pixels.push(Pixel::new(r, g, b));
        }
    }

    Ok(PixelGrid::from_pixels(width, height, pixels)?)
}

/// Writes a [`LumaGrid`] as a raw PGM (`P5`) image.
pub fn write_pgm(grid: &LumaGrid, mut writer: impl Write) -> Result<(), NetpbmError> {
    writeln!(writer, "P5")?;
    writeln!(writer, "{} {}", grid.width(), grid.height())?;
    writeln!(writer, "255")?;
    writer.write_all(grid.data())?;
    writer.flush()?;
    Ok(())
}

/// A byte cursor over netpbm text, handling whitespace and `#` comments.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Skips whitespace and comment lines.
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Reads the next whitespace-delimited token.
    fn token(&mut self) -> Result<String, NetpbmError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(NetpbmError::BadHeader {
                reason: "unexpected end of file".to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
    }

    /// Reads the next token as an unsigned number.
    fn number(&mut self, field: &str) -> Result<u32, NetpbmError> {
        let tok = self.token().map_err(|_| NetpbmError::BadHeader {
            reason: format!("missing {field}"),
        })?;
        tok.parse().map_err(|_| NetpbmError::BadHeader {
            reason: format!("{field} is not a number: '{tok}'"),
        })
    }

    /// Reads the next plain-format sample, checking the 8-bit range.
    fn sample(&mut self) -> Result<u8, NetpbmError> {
        let tok = self.token().map_err(|_| NetpbmError::BadData {
            reason: "pixel data ended early".to_string(),
        })?;
        let v: u32 = tok.parse().map_err(|_| NetpbmError::BadData {
            reason: format!("sample is not a number: '{tok}'"),
        })?;
        if v > 255 {
            return Err(NetpbmError::BadData {
                reason: format!("sample {v} exceeds maxval 255"),
            });
        }
        Ok(v as u8)
    }

    /// Consumes the single whitespace byte before raw data.
    fn skip_single_whitespace(&mut self) -> Result<(), NetpbmError> {
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(NetpbmError::BadHeader {
                reason: "missing separator before raw data".to_string(),
            }),
        }
    }

    /// The unconsumed remainder of the input.
    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}
