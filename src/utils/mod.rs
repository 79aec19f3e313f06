//! Utility functions shared by the loaders and the CLI

pub mod logging;

use std::path::Path;

use crate::error::{IngestError, Result};

pub use logging::{
    LogObserver, NoopObserver, ProgressBarObserver, create_main_progress_bar,
    log_operation_complete, log_operation_start, log_warning,
};

/// Validates that a directory exists and is a directory
///
/// # Errors
/// Returns an error if the directory does not exist or is not a directory
pub fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Directory does not exist: {}", dir.display()),
        )));
    }
    Ok(())
}
