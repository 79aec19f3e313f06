//! Configuration types shared by the value adapters.

/// Configuration for date format handling
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Format used when rendering a parsed date
    pub output_format: String,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
    /// Treat large integers as spreadsheet-export epoch milliseconds
    pub accept_epoch_millis: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%d/%m/%Y".to_string(), // 15/01/2023
                "%d-%m-%Y".to_string(), // 15-01-2023
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y%m%d".to_string(),   // Compact: 20230115
                "%d %b %Y".to_string(), // 15 Jan 2023
                "%d %B %Y".to_string(), // 15 January 2023
            ],
            output_format: "%Y-%m-%d".to_string(),
            enable_format_detection: true,
            accept_epoch_millis: true,
        }
    }
}
