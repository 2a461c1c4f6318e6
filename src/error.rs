use thiserror::Error;

/// Main error type for Chartify.
/// Aggregates errors from the standard library, dependencies and the internal modules.
#[derive(Error, Debug)]
pub enum ChartifyError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Internal module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    IngestError(#[from] crate::ingest::IngestError),

    #[error("{0}")]
    PipelineBusyError(#[from] crate::ingest::PipelineBusy),

    #[error("{0}")]
    ChartError(#[from] crate::chart::ChartError),

    #[error("{0}")]
    ExportError(#[from] crate::export::ExportError),

    #[error("{0}")]
    PreferenceError(#[from] crate::preferences::PreferenceError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, ChartifyError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| ChartifyError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestError;

    #[test]
    fn with_prefix_wraps_message() {
        let result: Result<(), ChartifyError> = Err(IngestError::EmptyCsv.into());
        let error = result.with_prefix("Loading 'sales.csv'").unwrap_err();
        assert_eq!(error.to_string(), "Loading 'sales.csv': No data found in CSV file");
    }

    #[test]
    fn with_prefix_keeps_success() {
        let result: Result<u8, ChartifyError> = Ok(7);
        assert_eq!(result.with_prefix("unused").unwrap(), 7);
    }
}
