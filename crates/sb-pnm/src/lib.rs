//! Binary netpbm codec (`P5` graymap, `P6` pixmap) for 8-bit rasters.
//!
//! Parsing and writing go through the `image` crate's PNM codec. This crate
//! pins the variant (binary only, the exact magic the caller asks for), keeps
//! samples to 8 bits and reports failures as [`PnmError`] so callers can tell
//! a bad magic from a deep raster or a short file.
//!
//! Encoding always writes maxval 255: `P5\n<w> <h> 255\n` (or `P6`).

mod codec;
mod error;
mod kind;

pub use codec::{decode, encode, read_file, write_file};
pub use error::PnmError;
pub use kind::PnmKind;
