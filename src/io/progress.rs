//! Progress display for bulk generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Games-written counter for a bulk generation run
///
/// Hidden progress bars accept every update and draw nothing, so callers
/// never branch on visibility.
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Create a bar counting up to `total` games
    pub fn new(total: usize, visible: bool, label: &str) -> Self {
        let bar = if visible {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(GENERATION_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar }
    }

    /// Count one more game written
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Games counted so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a summary of `written` games
    pub fn finish(&self, written: usize) {
        self.bar
            .finish_with_message(format!("{written} games written"));
    }
}
