//! Progress reporting for long-running operations.
//!
//! Operations push integer percentages (0–100) into a [`ProgressSink`]. The
//! sink is an opaque callback: a host may forward it to a progress bar, a UI
//! thread, or nowhere. The core never waits on it.

use std::sync::atomic::{AtomicU16, Ordering};

/// Receives percent updates for one logical operation.
pub trait ProgressSink: Send + Sync {
    /// Called with the overall completion percentage (0–100).
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// A no-op progress sink that discards all updates.
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _percent: u8) {}
}

/// `done / total * 100`, rounded down and capped at 100. An empty total is
/// treated as complete.
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) as f64 / total as f64) * 100.0).floor() as u8
}

/// Wraps a sink so it only ever sees strictly increasing values.
///
/// Repeated or regressing percentages are dropped, which keeps the
/// "monotonic per operation" contract even when several code paths report.
pub struct MonotonicProgress<'a> {
    inner: &'a dyn ProgressSink,
    /// Last forwarded percent plus one; zero means nothing forwarded yet.
    last: AtomicU16,
}

impl<'a> MonotonicProgress<'a> {
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        Self {
            inner,
            last: AtomicU16::new(0),
        }
    }

    /// The most recent value forwarded to the inner sink.
    pub fn last_reported(&self) -> Option<u8> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            n => Some((n - 1) as u8),
        }
    }
}

impl ProgressSink for MonotonicProgress<'_> {
    fn report(&self, percent: u8) {
        let percent = percent.min(100);
        let marker = u16::from(percent) + 1;
        let previous = self.last.fetch_max(marker, Ordering::SeqCst);
        if marker > previous {
            self.inner.report(percent);
        }
    }
}

/// Two-level progress over a fixed number of units (e.g., input files).
///
/// While unit `i` is in flight its inner percentage contributes
/// `inner / total` on top of the `completed / total * 100` already earned.
pub struct WeightedProgress<'a> {
    sink: MonotonicProgress<'a>,
    total_units: usize,
}

impl<'a> WeightedProgress<'a> {
    pub fn new(inner: &'a dyn ProgressSink, total_units: usize) -> Self {
        Self {
            sink: MonotonicProgress::new(inner),
            total_units,
        }
    }

    /// Combine completed units and the current unit's inner percentage.
    pub fn overall(completed: usize, total: usize, inner_percent: f64) -> u8 {
        if total == 0 {
            return 100;
        }
        let inner = inner_percent.clamp(0.0, 100.0);
        let value = completed as f64 / total as f64 * 100.0 + inner / total as f64;
        value.floor().clamp(0.0, 100.0) as u8
    }

    /// Report progress inside the unit that follows `completed` finished ones.
    pub fn report_inner(&self, completed: usize, inner_percent: f64) {
        self.sink
            .report(Self::overall(completed, self.total_units, inner_percent));
    }

    /// Report that `completed` units are fully done.
    pub fn report_completed(&self, completed: usize) {
        self.sink.report(percent_of(completed, self.total_units));
    }

    /// Force the final value to exactly 100.
    pub fn finish(&self) {
        self.sink.report(100);
    }

    pub fn last_reported(&self) -> Option<u8> {
        self.sink.last_reported()
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
