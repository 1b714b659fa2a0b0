use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    InvalidWorkerCount(usize),
    Raster(sb_core::Error),
    BandGap { expected_start: usize, start_row: usize },
    IncompleteCoverage { covered: usize, height: usize },
    WorkerSpawn { index: usize, reason: String },
    WorkerPanicked { index: usize },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkerCount(n) => {
                write!(f, "invalid worker count {n}: at least one worker is required")
            }
            Self::Raster(err) => write!(f, "invalid raster: {err}"),
            Self::BandGap {
                expected_start,
                start_row,
            } => write!(
                f,
                "band starts at row {start_row}, expected row {expected_start}"
            ),
            Self::IncompleteCoverage { covered, height } => {
                write!(f, "bands cover {covered} of {height} rows")
            }
            Self::WorkerSpawn { index, reason } => {
                write!(f, "failed to spawn worker {index}: {reason}")
            }
            Self::WorkerPanicked { index } => write!(f, "worker {index} panicked"),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Raster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sb_core::Error> for FilterError {
    fn from(err: sb_core::Error) -> Self {
        Self::Raster(err)
    }
}
