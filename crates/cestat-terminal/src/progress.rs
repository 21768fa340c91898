//! Spinner shown on stderr while Cost Explorer is queried

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that clears itself when dropped
pub struct QuerySpinner {
    bar: Option<ProgressBar>,
}

impl QuerySpinner {
    /// Start a spinner with `message`, or a no-op when `enabled` is false
    pub fn start(enabled: bool, message: impl Into<String>) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]")
        {
            pb.set_style(style);
        }
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(pb) }
    }

    /// Stop and erase the spinner
    pub fn finish(mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for QuerySpinner {
    fn drop(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}
