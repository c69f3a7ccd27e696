//! Progress reporting module

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for segment loading and stitching
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the progress bar over `total_segments`
    pub fn init_segments(&mut self, total_segments: u64) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let pb = ProgressBar::new(total_segments);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} segments {msg}")?
                .progress_chars("##-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
        Ok(())
    }

    /// Update progress for a loaded segment
    pub fn segment_loaded(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Loaded: {}", name));
            pb.inc(1);
        }
    }

    /// Show what is running after loading completes
    pub fn set_stage(&self, stage: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(stage.to_string());
        }
    }

    /// Finish progress reporting
    pub fn finish(&self, message: String) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(message);
        }
    }
}
