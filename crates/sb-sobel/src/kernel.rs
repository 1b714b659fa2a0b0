//! Per-pixel Sobel response.
//!
//! Taps are read from the first (red) channel. Taps that fall outside the
//! raster are dropped, so border pixels get a partial gradient.
//!
//! Quantization: `sqrt(gx^2 + gy^2) / 3`, truncated toward zero and saturated
//! at 255.

use sb_core::{RasterView, RasterViewMut};

type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Divisor applied to the magnitude before quantization.
pub const MAGNITUDE_SCALE: f64 = 3.0;

/// Channel the gradient is computed from.
pub const SOURCE_CHANNEL: u8 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gradient {
    pub gx: i32,
    pub gy: i32,
}

impl Gradient {
    pub fn magnitude(self) -> f64 {
        f64::from(self.gx).hypot(f64::from(self.gy))
    }

    pub fn to_sample(self) -> u8 {
        // `as` truncates toward zero and saturates.
        (self.magnitude() / MAGNITUDE_SCALE) as u8
    }
}

/// Sobel gradient at `(x, y)`. Caller guarantees the pixel is in bounds.
pub fn gradient_at(src: &RasterView<'_>, x: usize, y: usize) -> Gradient {
    let w = src.width();
    let h = src.height();
    if x > 0 && y > 0 && x + 1 < w && y + 1 < h {
        return gradient_interior(src, x, y);
    }

    let mut g = Gradient::default();
    for (ky, dy) in (-1isize..=1).enumerate() {
        let Some(sy) = y.checked_add_signed(dy).filter(|&sy| sy < h) else {
            continue;
        };
        for (kx, dx) in (-1isize..=1).enumerate() {
            let Some(sx) = x.checked_add_signed(dx).filter(|&sx| sx < w) else {
                continue;
            };
            let v = src.sample(sx, sy, SOURCE_CHANNEL).map_or(0, i32::from);
            g.gx += SOBEL_KERNEL_X[ky][kx] * v;
            g.gy += SOBEL_KERNEL_Y[ky][kx] * v;
        }
    }
    g
}

fn gradient_interior(src: &RasterView<'_>, x: usize, y: usize) -> Gradient {
    let c = src.channels() as usize;
    let ch = SOURCE_CHANNEL as usize;
    let rows = [src.row(y - 1), src.row(y), src.row(y + 1)];
    let cols = [(x - 1) * c + ch, x * c + ch, (x + 1) * c + ch];

    let mut g = Gradient::default();
    for (ky, row) in rows.iter().enumerate() {
        for (kx, &col) in cols.iter().enumerate() {
            let v = i32::from(row[col]);
            g.gx += SOBEL_KERNEL_X[ky][kx] * v;
            g.gy += SOBEL_KERNEL_Y[ky][kx] * v;
        }
    }
    g
}

/// Quantized Sobel magnitude at `(x, y)`.
#[inline]
pub fn sobel_sample(src: &RasterView<'_>, x: usize, y: usize) -> u8 {
    gradient_at(src, x, y).to_sample()
}

/// Fills `dst` with the Sobel response of source rows
/// `first_row..first_row + dst.height()`.
pub fn apply_rows(src: &RasterView<'_>, first_row: usize, dst: &mut RasterViewMut<'_>) {
    debug_assert_eq!(dst.width(), src.width());
    debug_assert_eq!(dst.channels(), 1);
    debug_assert!(first_row + dst.height() <= src.height());

    for ly in 0..dst.height() {
        let y = first_row + ly;
        let out = dst.row_mut(ly);
        for (x, px) in out.iter_mut().enumerate() {
            *px = sobel_sample(src, x, y);
        }
    }
}
