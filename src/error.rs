//! Error handling for the talent matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TalentMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Roster is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Tabular data error: {0}")]
    Tabular(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, TalentMatcherError>;

/// Convert csv reader errors to our custom error type
impl From<csv::Error> for TalentMatcherError {
    fn from(err: csv::Error) -> Self {
        TalentMatcherError::Tabular(err.to_string())
    }
}

/// Convert regex compilation errors to our custom error type
impl From<regex::Error> for TalentMatcherError {
    fn from(err: regex::Error) -> Self {
        TalentMatcherError::Processing(format!("Invalid pattern: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_columns() {
        let err = TalentMatcherError::MissingColumns(vec!["Nom".to_string(), "Activity".to_string()]);
        assert_eq!(err.to_string(), "Roster is missing required columns: Nom, Activity");
    }
}
