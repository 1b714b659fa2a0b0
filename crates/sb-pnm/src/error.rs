use core::fmt;
use std::io;

use image::ImageError;

use crate::PnmKind;

#[derive(Debug)]
pub enum PnmError {
    Io(io::Error),
    BadMagic { expected: PnmKind, found: Vec<u8> },
    MalformedHeader(String),
    UnsupportedMaxval(u32),
    UnsupportedChannels(u8),
    TooLarge { width: usize, height: usize },
    Truncated { expected: usize },
    Image(ImageError),
    Raster(sb_core::Error),
}

impl fmt::Display for PnmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::BadMagic { expected, found } => write!(
                f,
                "not a valid {} image: expected magic {:?}, found {:?}",
                expected.name(),
                String::from_utf8_lossy(expected.magic()),
                String::from_utf8_lossy(found)
            ),
            Self::MalformedHeader(what) => write!(f, "malformed header: {what}"),
            Self::UnsupportedMaxval(maxval) => write!(
                f,
                "unsupported maxval {maxval}: only 8-bit samples (1..=255) are supported"
            ),
            Self::UnsupportedChannels(channels) => write!(
                f,
                "cannot encode a {channels}-channel raster (expected 1 or 3)"
            ),
            Self::TooLarge { width, height } => {
                write!(f, "{width}x{height} raster is too large for a netpbm header")
            }
            Self::Truncated { expected } => {
                write!(f, "truncated raster data: expected {expected} bytes")
            }
            Self::Image(err) => write!(f, "pnm codec: {err}"),
            Self::Raster(err) => write!(f, "invalid raster: {err}"),
        }
    }
}

impl std::error::Error for PnmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Image(err) => Some(err),
            Self::Raster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PnmError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ImageError> for PnmError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::IoError(err) => Self::Io(err),
            other => Self::Image(other),
        }
    }
}

impl From<sb_core::Error> for PnmError {
    fn from(err: sb_core::Error) -> Self {
        Self::Raster(err)
    }
}
