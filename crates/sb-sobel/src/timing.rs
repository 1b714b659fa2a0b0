use std::time::{Duration, Instant};

/// Wall time spent in one named stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub label: String,
    pub elapsed: Duration,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            label: label.into(),
            elapsed,
        }
    }

    /// Whole milliseconds, truncated.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn elapsed_ms_f64(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Runs `f` and reports how long it took.
pub fn measure<T>(label: impl Into<String>, f: impl FnOnce() -> T) -> (T, StageTiming) {
    let start = Instant::now();
    let out = f();
    (out, StageTiming::new(label, start.elapsed()))
}
