//! Logging utilities for output and progress tracking
//!
//! This module provides standardized log lines and the progress observers the
//! loader reports to.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{LogObserver, log_operation_complete, log_operation_start, log_warning};
pub use progress::{
    NoopObserver, ProgressBarObserver, create_main_progress_bar,
    finish_progress_bar,
};
