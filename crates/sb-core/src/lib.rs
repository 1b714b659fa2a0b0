//! Foundational raster types for the sobel-bands workspace.
//!
//! ## Rasters and Stride
//! Rasters hold 8-bit samples with channels interleaved per pixel, rows
//! top-to-bottom. `stride` is the distance, in bytes, between adjacent row
//! starts and may be greater than `width * channels`.
//!
//! ## Disjoint Writes
//! [`RasterViewMut::split_rows_at_mut`] hands out non-overlapping exclusive
//! row ranges, so concurrent writers never alias.

mod error;
mod raster;

pub use error::Error;
pub use raster::{RasterBuffer, RasterView, RasterViewMut};
