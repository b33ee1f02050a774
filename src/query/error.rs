//! Query error types
//!
//! Defines all error conditions that can occur while validating and
//! executing measurement queries.

use thiserror::Error;

/// Request validation failures
///
/// Always terminal for the request: surfaced to the client with a specific
/// message and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or outside the fixed enumeration
    #[error("Invalid or missing field (field1/field2/field3)")]
    InvalidField,

    /// Exactly one of start_date/end_date was supplied
    #[error("Provide both start_date and end_date")]
    IncompleteRange,

    /// A date did not match the strict YYYY-MM-DD calendar format
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate,

    /// start_date parsed after end_date
    #[error("start_date must not be after end_date")]
    InvertedRange,
}

/// Errors that can occur during query execution
#[derive(Error, Debug)]
pub enum QueryError {
    /// Input validation failed before any storage access
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The filter matched no records on the list path
    #[error("No data found for this range/field")]
    NoData,

    /// No numeric values qualified for aggregation
    #[error("No values found for metrics")]
    NoValues,

    /// Storage layer error
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidField.to_string(),
            "Invalid or missing field (field1/field2/field3)"
        );
        assert_eq!(
            ValidationError::IncompleteRange.to_string(),
            "Provide both start_date and end_date"
        );
        assert_eq!(
            ValidationError::InvalidDate.to_string(),
            "Invalid date format. Use YYYY-MM-DD"
        );
    }

    #[test]
    fn test_not_found_messages_are_distinct() {
        assert_eq!(
            QueryError::NoData.to_string(),
            "No data found for this range/field"
        );
        assert_eq!(
            QueryError::NoValues.to_string(),
            "No values found for metrics"
        );
    }
}
