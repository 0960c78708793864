use thiserror::Error;

use crate::ApiError;

/// Message used when none is supplied
pub const DEFAULT_AGGREGATE_MESSAGE: &str = "Multiple errors occurred";

/// Ordered bundle of API errors treated as one failure
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AggregateError {
    errors: Vec<ApiError>,
    message: String,
}

impl AggregateError {
    /// Bundle errors under the default message
    pub fn new(errors: Vec<ApiError>) -> Self {
        Self::with_message(errors, DEFAULT_AGGREGATE_MESSAGE)
    }

    pub fn with_message(errors: Vec<ApiError>, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Constituent errors in insertion order
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApiError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ApiError> {
        self.errors
    }
}

impl AsRef<[ApiError]> for AggregateError {
    fn as_ref(&self) -> &[ApiError] {
        &self.errors
    }
}

impl IntoIterator for AggregateError {
    type Item = ApiError;
    type IntoIter = std::vec::IntoIter<ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a ApiError;
    type IntoIter = std::slice::Iter<'a, ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
