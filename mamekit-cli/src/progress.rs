//! Terminal progress bar fed by library progress reports.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use mamekit_lib::ProgressSink;

/// A percent bar that implements [`ProgressSink`].
pub(crate) struct PercentBar {
    bar: ProgressBar,
}

impl PercentBar {
    pub(crate) fn new(label: &str, quiet: bool) -> Self {
        let bar = ProgressBar::new(100);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {msg} [{bar:40.cyan/blue}] {pos:>3}%")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        bar.set_message(label.to_string());
        Self { bar }
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for PercentBar {
    fn report(&self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }
}

impl Drop for PercentBar {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
