use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use image::codecs::pnm::{PnmDecoder, PnmEncoder};
use image::{ImageDecoder, ImageEncoder, ImageError};
use sb_core::RasterBuffer;

use crate::{PnmError, PnmKind};

/// Decodes a binary netpbm image of the `expected` variant.
///
/// A `maxval` below 255 is rescaled to the full 8-bit range. Bytes after the
/// raster are left unread.
pub fn decode<R: Read>(reader: &mut R, expected: PnmKind) -> Result<RasterBuffer, PnmError> {
    // Magic first, so `BadMagic` can carry the bytes found.
    let mut magic = Vec::with_capacity(2);
    reader.by_ref().take(2).read_to_end(&mut magic)?;
    if magic.as_slice() != expected.magic() {
        return Err(PnmError::BadMagic {
            expected,
            found: magic,
        });
    }

    let decoder = PnmDecoder::new(magic.as_slice().chain(reader)).map_err(header_error)?;
    let maxval = decoder.header().maximal_sample();
    if decoder.color_type() != expected.color_type() {
        return Err(PnmError::UnsupportedMaxval(maxval));
    }

    let (width, height) = decoder.dimensions();
    log::debug!(
        "parsed {} header: {}x{} maxval {}",
        expected.name(),
        width,
        height,
        maxval
    );

    let mut image =
        RasterBuffer::new_fill(width as usize, height as usize, expected.channels(), 0)?;
    let len = image.data().len();
    decoder
        .read_image(image.data_mut())
        .map_err(|err| match err {
            ImageError::IoError(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                PnmError::Truncated { expected: len }
            }
            other => other.into(),
        })?;
    Ok(image)
}

fn header_error(err: ImageError) -> PnmError {
    match err {
        ImageError::IoError(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            PnmError::MalformedHeader("unexpected end of header".to_string())
        }
        ImageError::IoError(e) => PnmError::Io(e),
        other => PnmError::MalformedHeader(other.to_string()),
    }
}

/// Encodes a 1-channel raster as `P5` or a 3-channel raster as `P6`, always
/// with maxval 255.
pub fn encode<W: Write>(writer: &mut W, image: &RasterBuffer) -> Result<(), PnmError> {
    let kind = PnmKind::from_channels(image.channels())
        .ok_or(PnmError::UnsupportedChannels(image.channels()))?;
    let (Ok(width), Ok(height)) = (u32::try_from(image.width()), u32::try_from(image.height()))
    else {
        return Err(PnmError::TooLarge {
            width: image.width(),
            height: image.height(),
        });
    };

    PnmEncoder::new(writer)
        .with_subtype(kind.subtype())
        .write_image(image.data(), width, height, kind.color_type().into())?;
    Ok(())
}

pub fn read_file(path: &Path, expected: PnmKind) -> Result<RasterBuffer, PnmError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode(&mut reader, expected)
}

pub fn write_file(path: &Path, image: &RasterBuffer) -> Result<(), PnmError> {
    let mut writer = BufWriter::new(File::create(path)?);
    encode(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use sb_core::RasterBuffer;

    use super::{decode, encode, read_file, write_file};
    use crate::{PnmError, PnmKind};

    fn gradient_rgb(width: usize, height: usize) -> RasterBuffer {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 40) as u8, (y * 50) as u8, ((x + y) % 7) as u8]);
            }
        }
        RasterBuffer::from_vec(width, height, 3, data).expect("valid raster")
    }

    fn decode_pixmap(bytes: &[u8]) -> Result<RasterBuffer, PnmError> {
        decode(&mut Cursor::new(bytes.to_vec()), PnmKind::Pixmap)
    }

    #[test]
    fn graymap_and_pixmap_round_trip() {
        let gray = RasterBuffer::from_vec(3, 2, 1, vec![0, 1, 2, 253, 254, 255])
            .expect("valid raster");
        let mut buf = Vec::new();
        encode(&mut buf, &gray).expect("encode graymap");
        assert!(buf.starts_with(b"P5\n3 2 255\n"));
        let back = decode(&mut Cursor::new(buf), PnmKind::Graymap).expect("decode graymap");
        assert_eq!(back, gray);

        let rgb = gradient_rgb(5, 4);
        let mut buf = Vec::new();
        encode(&mut buf, &rgb).expect("encode pixmap");
        assert!(buf.starts_with(b"P6\n5 4 255\n"));
        let back = decode(&mut Cursor::new(buf), PnmKind::Pixmap).expect("decode pixmap");
        assert_eq!(back, rgb);
    }

    #[test]
    fn black_4x4_graymap_has_exact_bytes() {
        let img = RasterBuffer::new_fill(4, 4, 1, 0).expect("valid raster");
        let mut buf = Vec::new();
        encode(&mut buf, &img).expect("encode");

        let mut expected = b"P5\n4 4 255\n".to_vec();
        expected.extend_from_slice(&[0u8; 16]);
        assert_eq!(buf, expected);
    }

    #[test]
    fn header_comments_and_whitespace_are_skipped() {
        let bytes = b"P5 # made by hand\n  2\t# width\n 1\r\n255\n\x07\x09";
        let img = decode(&mut Cursor::new(bytes.to_vec()), PnmKind::Graymap).expect("decode");
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.data(), &[7, 9]);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        match decode_pixmap(b"P5\n1 1\n255\n\0").unwrap_err() {
            PnmError::BadMagic { expected, found } => {
                assert_eq!(expected, PnmKind::Pixmap);
                assert_eq!(found, b"P5");
            }
            other => panic!("unexpected error: {other}"),
        }

        for bytes in [&b"P"[..], &b""[..], &b"XY\n1 1\n255\n\0\0\0"[..]] {
            let err = decode_pixmap(bytes).unwrap_err();
            assert!(matches!(err, PnmError::BadMagic { .. }), "{err}");
        }
    }

    #[test]
    fn wide_samples_are_unsupported() {
        let mut bytes = b"P6\n1 1\n65535\n".to_vec();
        bytes.extend_from_slice(&[0u8; 6]);
        assert!(matches!(
            decode_pixmap(&bytes).unwrap_err(),
            PnmError::UnsupportedMaxval(65535)
        ));

        assert!(matches!(
            decode_pixmap(b"P6\n1 1\n256\n\0\0\0\0\0\0").unwrap_err(),
            PnmError::UnsupportedMaxval(256)
        ));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for bytes in [
            &b"P6\n-1 1\n255\n"[..],
            &b"P6\n1x 1\n255\n"[..],
            &b"P6\n1 1\n"[..],
            &b"P6\n99999999999 1\n255\n"[..],
            &b"P6\n1 1\n0\n"[..],
            &b"P6\n1 1\n70000\n"[..],
        ] {
            let err = decode_pixmap(bytes).unwrap_err();
            assert!(
                matches!(err, PnmError::MalformedHeader(_)),
                "unexpected error for {:?}: {err}",
                String::from_utf8_lossy(bytes)
            );
        }
    }

    #[test]
    fn truncated_raster_is_an_error() {
        let mut bytes = b"P6\n2 2\n255\n".to_vec();
        bytes.extend_from_slice(&[9u8; 11]);
        let err = decode_pixmap(&bytes).unwrap_err();
        assert!(matches!(err, PnmError::Truncated { expected: 12 }), "{err}");
    }

    #[test]
    fn reading_stops_after_the_raster() {
        let mut bytes = b"P6\n1 1\n255\n".to_vec();
        let header_len = bytes.len() as u64;
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);

        let mut cursor = Cursor::new(bytes);
        let img = decode(&mut cursor, PnmKind::Pixmap).expect("decode");
        assert_eq!(img.data(), &[1, 2, 3]);
        assert_eq!(cursor.position(), header_len + 3);
    }

    #[test]
    fn low_maxval_is_rescaled_to_full_range() {
        let mut bytes = b"P6\n1 1\n15\n".to_vec();
        bytes.extend_from_slice(&[15, 7, 0]);
        let img = decode_pixmap(&bytes).expect("decode");
        assert_eq!(img.data(), &[255, 119, 0]);
    }

    #[test]
    fn empty_raster_round_trips() {
        let img = RasterBuffer::new_fill(0, 0, 1, 0).expect("valid raster");
        let mut buf = Vec::new();
        encode(&mut buf, &img).expect("encode");
        assert_eq!(buf, b"P5\n0 0 255\n");
        let back = decode(&mut Cursor::new(buf), PnmKind::Graymap).expect("decode");
        assert_eq!(back, img);
    }

    #[test]
    fn unencodable_rasters_are_rejected() {
        let img = RasterBuffer::new_fill(1, 1, 2, 0).expect("valid raster");
        let err = encode(&mut Vec::new(), &img).unwrap_err();
        assert!(matches!(err, PnmError::UnsupportedChannels(2)));

        let wide = RasterBuffer::new_fill(u32::MAX as usize + 1, 0, 1, 0).expect("valid raster");
        let err = encode(&mut Vec::new(), &wide).unwrap_err();
        assert!(matches!(err, PnmError::TooLarge { height: 0, .. }));
    }

    #[test]
    fn file_helpers_round_trip_and_report_missing_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rgb.ppm");
        let rgb = gradient_rgb(3, 3);

        write_file(&path, &rgb).expect("write file");
        let back = read_file(&path, PnmKind::Pixmap).expect("read file");
        assert_eq!(back, rgb);

        let err = read_file(&dir.path().join("missing.ppm"), PnmKind::Pixmap).unwrap_err();
        assert!(matches!(err, PnmError::Io(_)));
    }
}
