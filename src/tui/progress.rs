//! Progress counter for the transcript replay

use indicatif::{ProgressBar, ProgressStyle};

/// Shows `shown / total` under the replayed transcript
pub struct ReplayProgress {
    bar: ProgressBar,
}

impl ReplayProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.green} {pos} / {len} {msg}") {
            bar.set_style(style.tick_strings(&["\u{2588}", " ", "\u{2588}"]));
        }
        bar.enable_steady_tick(std::time::Duration::from_millis(500));
        Self { bar }
    }

    /// Run `print` without the counter getting in the way
    pub fn print_above(&self, print: impl FnOnce()) {
        self.bar.suspend(print);
    }

    pub fn set_position(&self, shown: usize) {
        self.bar.set_position(shown as u64);
    }

    /// Stop the counter, leaving the final count on screen
    pub fn finish(&self, msg: &str) {
        self.bar.finish_with_message(msg.to_string());
    }
}

impl Drop for ReplayProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
