//! Row-band partitioning.
//!
//! `plan_bands(height, n)` gives every band `height / n` rows and lets the
//! last band run to `height`, absorbing the remainder. When `height < n` all
//! bands but the last are empty.

use core::ops::Range;

use sb_core::{RasterView, RasterViewMut};

use crate::FilterError;
use crate::kernel::apply_rows;

/// Half-open row range `[start_row, end_row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub start_row: usize,
    pub end_row: usize,
}

impl RowBand {
    pub fn len(&self) -> usize {
        self.end_row - self.start_row
    }

    pub fn is_empty(&self) -> bool {
        self.end_row == self.start_row
    }

    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.end_row
    }
}

pub fn plan_bands(height: usize, workers: usize) -> Result<Vec<RowBand>, FilterError> {
    if workers == 0 {
        return Err(FilterError::InvalidWorkerCount(workers));
    }

    let rows_per_band = height / workers;
    let bands = (0..workers)
        .map(|i| RowBand {
            start_row: i * rows_per_band,
            end_row: if i == workers - 1 {
                height
            } else {
                (i + 1) * rows_per_band
            },
        })
        .collect();
    Ok(bands)
}

/// One worker's share: shared input plus exclusive output rows.
#[derive(Debug)]
pub struct Band<'a> {
    rows: RowBand,
    input: RasterView<'a>,
    output: RasterViewMut<'a>,
}

impl Band<'_> {
    pub fn rows(&self) -> RowBand {
        self.rows
    }

    pub fn run(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        apply_rows(&self.input, self.rows.start_row, &mut self.output);
    }
}

/// Carves `output` into one exclusive view per planned band.
///
/// The plan must be contiguous from row 0 and end exactly at
/// `output.height()`; anything else is rejected before any pixel is written.
pub fn split_bands<'a>(
    plan: &[RowBand],
    input: RasterView<'a>,
    output: RasterViewMut<'a>,
) -> Result<Vec<Band<'a>>, FilterError> {
    let height = output.height();
    let mut bands = Vec::with_capacity(plan.len());
    let mut rest = output;
    let mut cursor = 0usize;

    for &rows in plan {
        if rows.start_row != cursor || rows.end_row < rows.start_row {
            return Err(FilterError::BandGap {
                expected_start: cursor,
                start_row: rows.start_row,
            });
        }
        if rows.end_row > height {
            return Err(FilterError::IncompleteCoverage {
                covered: rows.end_row,
                height,
            });
        }

        let (head, tail) = rest.split_rows_at_mut(rows.len())?;
        bands.push(Band {
            rows,
            input,
            output: head,
        });
        rest = tail;
        cursor = rows.end_row;
    }

    if cursor != height {
        return Err(FilterError::IncompleteCoverage {
            covered: cursor,
            height,
        });
    }

    Ok(bands)
}
