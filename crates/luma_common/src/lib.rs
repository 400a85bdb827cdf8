//! Shared foundational types used across the Luma verification harness.
//!
//! This crate provides the data model the rest of the workspace builds on:
//! RGB samples and fixed-point channel weights, rectangular pixel grids,
//! and netpbm image reading and writing.

#![warn(missing_docs)]

pub mod grid;
pub mod netpbm;
pub mod pixel;

pub use grid::{GridError, LumaGrid, PixelGrid};
pub use netpbm::{read_ppm, write_pgm, NetpbmError};
pub use pixel::{Pixel, Weights, NORM_SHIFT, NORM_SUM};
