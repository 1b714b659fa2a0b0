//! Fixed-size parallel executor.
//!
//! One scoped OS thread per band, spawned once and joined before returning.
//! Workers share the input read-only and own disjoint output rows, so no
//! locks or atomics are involved and the result does not depend on the
//! worker count or on scheduling order.

use std::thread;

use sb_core::{Error, RasterBuffer, RasterView, RasterViewMut};

use crate::FilterError;
use crate::bands::{Band, RowBand, plan_bands, split_bands};
use crate::timing::{StageTiming, measure};

pub const DEFAULT_WORKERS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SobelConfig {
    /// Number of bands, and therefore worker threads.
    pub workers: usize,
}

impl Default for SobelConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// What a run did: the band layout and the parallel-phase wall time.
#[derive(Debug, Clone)]
pub struct FilterStats {
    pub bands: Vec<RowBand>,
    pub timing: StageTiming,
}

#[derive(Debug, Clone)]
pub struct SobelFilter {
    cfg: SobelConfig,
}

impl SobelFilter {
    pub fn new(cfg: SobelConfig) -> Result<Self, FilterError> {
        if cfg.workers == 0 {
            return Err(FilterError::InvalidWorkerCount(cfg.workers));
        }
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SobelConfig {
        &self.cfg
    }

    /// Allocates a full-size single-channel output and filters into it.
    pub fn apply(&self, input: &RasterBuffer) -> Result<(RasterBuffer, FilterStats), FilterError> {
        let mut output = RasterBuffer::new_fill(input.width(), input.height(), 1, 0)?;
        let stats = self.apply_into(input.as_view(), output.as_view_mut())?;
        Ok((output, stats))
    }

    pub fn apply_into(
        &self,
        input: RasterView<'_>,
        output: RasterViewMut<'_>,
    ) -> Result<FilterStats, FilterError> {
        if output.channels() != 1 {
            return Err(Error::ChannelMismatch {
                expected: 1,
                actual: output.channels(),
            }
            .into());
        }
        if (output.width(), output.height()) != (input.width(), input.height()) {
            return Err(Error::DimensionMismatch {
                expected: (input.width(), input.height()),
                actual: (output.width(), output.height()),
            }
            .into());
        }

        let plan = plan_bands(input.height(), self.cfg.workers)?;
        if self.cfg.workers > input.height() {
            log::warn!(
                "{} workers for {} rows: {} bands will be empty",
                self.cfg.workers,
                input.height(),
                plan.iter().filter(|b| b.is_empty()).count()
            );
        }
        log::debug!(
            "filtering {}x{} raster with {} bands",
            input.width(),
            input.height(),
            plan.len()
        );

        let bands = split_bands(&plan, input, output)?;
        let (result, timing) = measure("sobel", || run_bands(bands));
        result?;

        log::debug!("parallel phase took {:.3} ms", timing.elapsed_ms_f64());
        Ok(FilterStats {
            bands: plan,
            timing,
        })
    }
}

fn run_bands(bands: Vec<Band<'_>>) -> Result<(), FilterError> {
    for (index, band) in bands.iter().enumerate() {
        let rows = band.rows();
        log::trace!("band {index}: rows {}..{}", rows.start_row, rows.end_row);
    }
    run_workers(bands, |_, mut band| band.run())
}

/// Runs `work` on every task, one named scoped thread per task.
///
/// Every spawned worker is joined before returning. The first spawn failure
/// stops further spawns; the first panic (by join order) is reported.
fn run_workers<T, F>(tasks: Vec<T>, work: F) -> Result<(), FilterError>
where
    T: Send,
    F: Fn(usize, T) + Sync,
{
    let work = &work;
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(tasks.len());
        let mut failure = None;

        for (index, task) in tasks.into_iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("sobel-band-{index}"))
                .spawn_scoped(scope, move || work(index, task));
            match spawned {
                Ok(handle) => handles.push((index, handle)),
                Err(err) => {
                    failure = Some(FilterError::WorkerSpawn {
                        index,
                        reason: err.to_string(),
                    });
                    break;
                }
            }
        }

        // Join everything so a panicking worker is reported, not re-raised
        // by the scope.
        for (index, handle) in handles {
            if handle.join().is_err() && failure.is_none() {
                failure = Some(FilterError::WorkerPanicked { index });
            }
        }

        failure.map_or(Ok(()), Err)
    })
}
