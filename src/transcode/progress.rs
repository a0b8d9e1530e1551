//! Progress observers.

use std::sync::Mutex;

use indicatif::ProgressBar;

/// Observer for operation progress in [0.0, 1.0].
pub trait Progress: Send + Sync {
    /// Report the completed fraction.
    fn set(&self, fraction: f32);
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set(&self, _fraction: f32) {}
}

/// Bars are driven in thousandths; create them with `ProgressBar::new(1000)`.
impl Progress for ProgressBar {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn set(&self, fraction: f32) {
        // Safe: fraction is clamped to [0, 1]
        self.set_position((fraction.clamp(0.0, 1.0) * 1000.0).round() as u64);
    }
}

/// Forwards only values that are in range and not below the last one.
///
/// Worker threads report chunk completions out of order; this keeps what
/// the observer sees non-decreasing.
pub(crate) struct Monotonic<'a> {
    inner: &'a dyn Progress,
    last: Mutex<f32>,
}

impl<'a> Monotonic<'a> {
    pub(crate) fn new(inner: &'a dyn Progress) -> Self {
        Self {
            inner,
            last: Mutex::new(0.0),
        }
    }

    /// Report `done / total` of the span between `start` and `end`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn span(&self, start: f32, end: f32, done: usize, total: usize) {
        let part = if total == 0 {
            1.0
        } else {
            done as f32 / total as f32
        };
        self.set((end - start).mul_add(part, start));
    }
}

impl Progress for Monotonic<'_> {
    fn set(&self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        // A poisoned lock only means another reporter panicked; keep going.
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if fraction > *last {
            *last = fraction;
            self.inner.set(fraction);
        }
    }
}
