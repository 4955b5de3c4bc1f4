//! Progress display for solver sweeps

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SWEEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// One progress bar tracking the blocks of the current sweep
pub struct SweepProgress {
    bar: ProgressBar,
}

impl Default for SweepProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepProgress {
    /// Create a hidden bar; it appears on the first sweep
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(SWEEP_STYLE.clone());
        Self { bar }
    }

    /// Reset the bar for a sweep over `blocks` blocks
    pub fn start_sweep(&self, sweep: usize, blocks: usize) {
        self.bar.set_length(blocks as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(format!("sweep {sweep}"));
    }

    /// Mark one more block as searched and show the best score so far
    pub fn block_done(&self, best_score: u64) {
        self.bar.inc(1);
        self.bar.set_message(format!("best {best_score}"));
    }

    /// Show a phase change without moving the bar
    pub fn set_phase(&self, phase: &str) {
        self.bar.set_message(phase.to_string());
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
