use thiserror::Error;

use crate::error::RampartError;
use crate::normalize::Normalize;
use crate::{AggregateError, ApiError};

/// What [`ErrorCollector::raise`] hands back
#[derive(Debug, Clone, Error)]
pub enum Raised {
    /// Exactly one error was collected, returned as-is
    #[error(transparent)]
    Single(ApiError),
    /// Several errors were collected
    #[error(transparent)]
    Aggregate(AggregateError),
}

impl Raised {
    pub fn errors(&self) -> &[ApiError] {
        match self {
            Self::Single(err) => std::slice::from_ref(err),
            Self::Aggregate(aggregate) => aggregate.errors(),
        }
    }
}

impl AsRef<[ApiError]> for Raised {
    fn as_ref(&self) -> &[ApiError] {
        self.errors()
    }
}

/// Accumulates API errors across a multi-step operation
///
/// Single-owner: the `&mut self` receivers mean concurrent writers must
/// use one collector each and merge afterwards.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    errors: Vec<ApiError>,
}

impl ErrorCollector {
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Normalize a failure and append it
    pub fn add(&mut self, failure: impl Normalize) {
        self.errors.push(failure.normalize());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Collected errors in insertion order
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }

    /// Turn the collected errors into a failure
    ///
    /// One error comes back unchanged; several come back as an
    /// [`AggregateError`] in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RampartError::EmptyCollector`] when nothing was collected
    pub fn raise(&self) -> Result<Raised, RampartError> {
        match self.errors.as_slice() {
            [] => Err(RampartError::EmptyCollector),
            [single] => Ok(Raised::Single(single.clone())),
            many => Ok(Raised::Aggregate(AggregateError::with_message(
                many.to_vec(),
                format!("{} errors occurred", many.len()),
            ))),
        }
    }

    /// Non-failing alternative to [`ErrorCollector::raise`]
    ///
    /// Unlike `raise`, any collected error, even a single one, is wrapped
    /// in an [`AggregateError`].
    ///
    /// # Errors
    ///
    /// Returns every collected error when the collector is not empty
    pub fn to_result<T>(&self, value: T) -> Result<T, AggregateError> {
        if self.has_errors() {
            return Err(AggregateError::new(self.errors.clone()));
        }
        Ok(value)
    }

    /// Drop everything collected so far
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl AsRef<[ApiError]> for ErrorCollector {
    fn as_ref(&self) -> &[ApiError] {
        &self.errors
    }
}

impl<T: Normalize> Extend<T> for ErrorCollector {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.errors.extend(iter.into_iter().map(Normalize::normalize));
    }
}
