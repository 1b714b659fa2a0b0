//! Parallel Sobel edge filter.
//!
//! Pipeline: [`plan_bands`] splits the image height into one contiguous row
//! band per worker, [`split_bands`] turns the plan into exclusive output
//! views, and [`SobelFilter`] runs one scoped thread per band, applying the
//! per-pixel kernel from [`kernel`].
//!
//! Output is byte-identical for every worker count: each pixel depends only
//! on the immutable input and is written by exactly one band.

pub mod bands;
mod error;
pub mod executor;
pub mod kernel;
pub mod timing;

pub use bands::{Band, RowBand, plan_bands, split_bands};
pub use error::FilterError;
pub use executor::{DEFAULT_WORKERS, FilterStats, SobelConfig, SobelFilter};
pub use kernel::{Gradient, gradient_at, sobel_sample};
pub use timing::{StageTiming, measure};
