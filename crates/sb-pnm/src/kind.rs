use image::ColorType;
use image::codecs::pnm::{PnmSubtype, SampleEncoding};

/// Binary netpbm variants handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmKind {
    /// `P5`, one sample per pixel.
    Graymap,
    /// `P6`, interleaved red/green/blue.
    Pixmap,
}

impl PnmKind {
    pub fn magic(self) -> &'static [u8; 2] {
        self.subtype().magic_constant()
    }

    pub fn channels(self) -> u8 {
        self.color_type().channel_count()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Graymap => "PGM",
            Self::Pixmap => "PPM",
        }
    }

    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(Self::Graymap),
            3 => Some(Self::Pixmap),
            _ => None,
        }
    }

    /// Always the binary encoding.
    pub fn subtype(self) -> PnmSubtype {
        match self {
            Self::Graymap => PnmSubtype::Graymap(SampleEncoding::Binary),
            Self::Pixmap => PnmSubtype::Pixmap(SampleEncoding::Binary),
        }
    }

    /// 8-bit color type the decoder must report for this variant.
    pub fn color_type(self) -> ColorType {
        match self {
            Self::Graymap => ColorType::L8,
            Self::Pixmap => ColorType::Rgb8,
        }
    }
}
