use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// Elapsed-time checkpoints for the phases of one statement execution.
///
/// The executor records "prepare", "execute", and "close"; each checkpoint
/// captures the time since the previous one.
#[derive(Debug, Clone)]
pub struct Metric {
    start: Instant,
    last: Instant,
    checkpoints: Vec<(&'static str, Duration)>,
}

impl Metric {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            checkpoints: Vec::with_capacity(3),
        }
    }

    /// Record the elapsed time since the previous checkpoint under `name`.
    pub fn checkpoint(&mut self, name: &'static str) {
        let now = Instant::now();
        self.checkpoints.push((name, now - self.last));
        self.last = now;
    }

    /// Total elapsed time since the metric was created.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.last - self.start
    }

    #[must_use]
    pub fn checkpoints(&self) -> &[(&'static str, Duration)] {
        &self.checkpoints
    }

    /// Compact single-line rendering for log records, e.g.
    /// `total=2.1ms prepare=1.3ms execute=0.7ms close=0.1ms`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64);
        let _ = write!(out, "total={:.1?}", self.total());
        for (name, elapsed) in &self.checkpoints {
            let _ = write!(out, " {name}={elapsed:.1?}");
        }
        out
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::new()
    }
}
