//! Progress reporting utilities for long-running operations
//!
//! This module provides standardized progress reporting functionality
//! for source loading, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

use crate::loader::{LoadProgress, ProgressObserver};

/// Default style for a main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Create a main progress bar with a standardized style
///
/// # Arguments
/// * `length` - Total length for the progress bar
/// * `description` - Optional description to display as the initial message
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(DEFAULT_MAIN_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with a final message
pub fn finish_progress_bar(pb: &ProgressBar, message: impl Into<String>) {
    pb.finish_with_message(message.into());
}

/// Observer that ignores all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _progress: &LoadProgress) {}
}

/// Observer that drives an indicatif progress bar, one tick per source
#[derive(Debug, Clone)]
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    /// Observer over a fresh bar sized on the first notification
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: create_main_progress_bar(0, Some("Loading schools")),
        }
    }

    /// Observer over an existing bar
    #[must_use]
    pub const fn with_bar(bar: ProgressBar) -> Self {
        Self { bar }
    }

    /// The underlying bar
    #[must_use]
    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_progress(&self, progress: &LoadProgress) {
        self.bar.set_length(progress.sources_total as u64);
        self.bar.set_position(progress.sources_completed as u64);
        if let Some(source) = &progress.current_source {
            self.bar.set_message(source.clone());
        }
        if progress.is_complete() {
            finish_progress_bar(&self.bar, "All sources loaded");
        }
    }
}
