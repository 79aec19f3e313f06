//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::path::Path;

use crate::loader::{LoadProgress, LoadSummary, ProgressObserver};

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} records from {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} records from {}",
            operation,
            items,
            path.display()
        );
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Observer that writes each progress notification to the log at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_progress(&self, progress: &LoadProgress) {
        match &progress.current_source {
            Some(source) => log::info!(
                "Loaded {} ({}/{})",
                source,
                progress.sources_completed,
                progress.sources_total
            ),
            None => log::info!("Loading {} school sources", progress.sources_total),
        }
    }

    fn on_complete(&self, summary: &LoadSummary) {
        log::info!(
            "Load complete: {} schools ({} failed sources)",
            summary.final_count,
            summary.failed_sources().count()
        );
    }
}
