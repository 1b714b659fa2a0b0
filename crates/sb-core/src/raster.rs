use crate::Error;

/// Owned, tightly packed 8-bit raster with interleaved channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    channels: u8,
    data: Vec<u8>,
}

impl RasterBuffer {
    pub fn from_vec(
        width: usize,
        height: usize,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        if channels == 0 {
            return Err(Error::ZeroChannels);
        }

        let expected = byte_len(width, height, channels).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn new_fill(width: usize, height: usize, channels: u8, value: u8) -> Result<Self, Error> {
        if channels == 0 {
            return Err(Error::ZeroChannels);
        }
        let len = byte_len(width, height, channels).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;

        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        self.as_view().pixel(x, y)
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.row_len(),
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> RasterViewMut<'_> {
        RasterViewMut {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.row_len(),
            data: &mut self.data,
        }
    }

    fn row_len(&self) -> usize {
        self.width * self.channels as usize
    }
}

/// Read-only raster view. `stride` is the distance in bytes between row
/// starts and may exceed `width * channels`.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    width: usize,
    height: usize,
    channels: u8,
    stride: usize,
    data: &'a [u8],
}

impl<'a> RasterView<'a> {
    pub fn from_slice(
        width: usize,
        height: usize,
        channels: u8,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, Error> {
        validate_layout(width, height, channels, stride, data.len())?;
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `y` as `width * channels` interleaved bytes.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels as usize]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels as usize;
        let idx = y * self.stride + x * c;
        self.data.get(idx..idx + c)
    }

    pub fn sample(&self, x: usize, y: usize, channel: u8) -> Option<u8> {
        if channel >= self.channels {
            return None;
        }
        self.pixel(x, y).map(|px| px[channel as usize])
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width * self.channels as usize
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [u8]> {
        if !self.is_contiguous() {
            return None;
        }
        self.data.get(0..self.stride * self.height)
    }
}

/// Exclusive raster view.
#[derive(Debug)]
pub struct RasterViewMut<'a> {
    width: usize,
    height: usize,
    channels: u8,
    stride: usize,
    data: &'a mut [u8],
}

impl<'a> RasterViewMut<'a> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        channels: u8,
        stride: usize,
        data: &'a mut [u8],
    ) -> Result<Self, Error> {
        validate_layout(width, height, channels, stride, data.len())?;
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels as usize]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.width * self.channels as usize]
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.stride,
            data: self.data,
        }
    }

    /// Splits into rows `[0, y)` and `[y, height)`. The halves borrow
    /// disjoint byte ranges, so both may be written concurrently.
    pub fn split_rows_at_mut(self, y: usize) -> Result<(Self, Self), Error> {
        if y > self.height {
            return Err(Error::OutOfBounds);
        }

        let mid = y
            .checked_mul(self.stride)
            .ok_or(Error::OutOfBounds)?
            .min(self.data.len());
        let (top, bottom) = self.data.split_at_mut(mid);

        Ok((
            Self {
                width: self.width,
                height: y,
                channels: self.channels,
                stride: self.stride,
                data: top,
            },
            Self {
                width: self.width,
                height: self.height - y,
                channels: self.channels,
                stride: self.stride,
                data: bottom,
            },
        ))
    }
}

fn byte_len(width: usize, height: usize, channels: u8) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(channels as usize)
}

fn validate_layout(
    width: usize,
    height: usize,
    channels: u8,
    stride: usize,
    len: usize,
) -> Result<(), Error> {
    if channels == 0 {
        return Err(Error::ZeroChannels);
    }

    let row_len = width.checked_mul(channels as usize).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: len,
    })?;
    if stride < row_len {
        return Err(Error::InvalidStride);
    }

    let min_len = min_required_len(row_len, height, stride).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: len,
    })?;
    if len < min_len {
        return Err(Error::SizeMismatch {
            expected: min_len,
            actual: len,
        });
    }

    Ok(())
}

fn min_required_len(row_len: usize, height: usize, stride: usize) -> Option<usize> {
    if row_len == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(row_len)
}
