//! Error types for salarycast

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum SalaryError {
    /// Source dataset missing or malformed; callers may fall back to synthetic data
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// A categorical value was never observed at fit time
    #[error("Unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    /// Encoded input could not be aligned to the frozen feature schema
    #[error("Schema mismatch: expected {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    /// Data loading or conversion error
    #[error("Data error: {0}")]
    DataError(String),

    /// Operation requires a fitted model
    #[error("Model is not fitted")]
    ModelNotFitted,

    /// Array dimensions do not match
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    /// Numerical computation failed
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Invalid input or configuration
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Report artifact generation failed
    #[error("Report error: {0}")]
    ReportError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SalaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message() {
        let err = SalaryError::UnknownCategory {
            field: "Gender".to_string(),
            value: "Other".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown category 'Other' for field 'Gender'"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SalaryError = io.into();
        assert!(matches!(err, SalaryError::IoError(_)));
    }
}
