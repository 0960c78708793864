//! Total conversion from arbitrary failures to [`ApiError`]
//!
//! This is the fallback path: it knows nothing about mapping policies.
//! Anything already an `ApiError` passes through untouched, any other
//! error becomes an opaque 500, and any other value becomes an opaque 500
//! with the `UNKNOWN_ERROR` code.

use std::fmt;
use std::sync::Arc;

use http::StatusCode;

use crate::api_error::{SANITIZED_CODE, SANITIZED_TITLE};
use crate::domain::{DomainError, ErrorCode};
use crate::{ApiError, Cause};

/// Code given to failures that are not errors at all
pub const UNKNOWN_CODE: &str = "UNKNOWN_ERROR";
/// Title given to failures that are not errors at all
pub const UNKNOWN_TITLE: &str = "Unknown Error";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Any failure that may reach the API boundary
#[derive(Debug)]
pub enum Failure<C: ErrorCode> {
    /// Already in final form
    Api(ApiError),
    /// Application-defined failure awaiting mapping
    Domain(DomainError<C>),
    /// Any other error value
    Error(BoxError),
    /// A value that is not an error: a string, a plain object, ...
    Value(serde_json::Value),
}

impl<C: ErrorCode> Failure<C> {
    pub const fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    pub const fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub const fn as_domain_error(&self) -> Option<&DomainError<C>> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }

    /// Borrow a wrapped error of a concrete type, if that is what this holds
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Error(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Operational flag, for failures that carry one
    pub const fn is_operational(&self) -> Option<bool> {
        match self {
            Self::Api(err) => Some(err.is_operational()),
            Self::Domain(err) => Some(err.is_operational()),
            Self::Error(_) | Self::Value(_) => None,
        }
    }

    /// Turn the failure into a diagnostic cause
    pub fn into_cause(self) -> Cause {
        match self {
            Self::Api(err) => Arc::new(err),
            Self::Domain(err) => Arc::new(err),
            Self::Error(err) => Arc::from(err),
            Self::Value(value) => Arc::new(UnknownFailure(value)),
        }
    }
}

impl<C: ErrorCode> From<ApiError> for Failure<C> {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl<C: ErrorCode> From<DomainError<C>> for Failure<C> {
    fn from(err: DomainError<C>) -> Self {
        Self::Domain(err)
    }
}

impl<C: ErrorCode> From<BoxError> for Failure<C> {
    fn from(err: BoxError) -> Self {
        Self::Error(err)
    }
}

impl<C: ErrorCode> From<anyhow::Error> for Failure<C> {
    fn from(err: anyhow::Error) -> Self {
        Self::Error(err.into())
    }
}

impl<C: ErrorCode> From<serde_json::Value> for Failure<C> {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

impl<C: ErrorCode> From<String> for Failure<C> {
    fn from(value: String) -> Self {
        Self::Value(serde_json::Value::String(value))
    }
}

impl<C: ErrorCode> From<&str> for Failure<C> {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

/// A non-error value kept as the cause of a normalized error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFailure(pub serde_json::Value);

impl fmt::Display for UnknownFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_text(&self.0))
    }
}

impl std::error::Error for UnknownFailure {}

/// Conversion into an [`ApiError`] without any mapping policy
pub trait Normalize {
    fn normalize(self) -> ApiError;
}

/// Convert anything into an [`ApiError`]
pub fn normalize(value: impl Normalize) -> ApiError {
    value.normalize()
}

impl Normalize for ApiError {
    fn normalize(self) -> ApiError {
        self
    }
}

impl<C: ErrorCode> Normalize for DomainError<C> {
    fn normalize(self) -> ApiError {
        let detail = self.message().to_owned();
        internal(detail, Arc::new(self))
    }
}

impl Normalize for BoxError {
    fn normalize(self) -> ApiError {
        let detail = self.to_string();
        internal(detail, Arc::from(self))
    }
}

impl Normalize for anyhow::Error {
    fn normalize(self) -> ApiError {
        let boxed: BoxError = self.into();
        boxed.normalize()
    }
}

impl Normalize for serde_json::Value {
    fn normalize(self) -> ApiError {
        ApiError::builder(StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_TITLE, value_text(&self), UNKNOWN_CODE)
            .cause(Arc::new(UnknownFailure(self)) as Cause)
            .finish()
    }
}

impl Normalize for String {
    fn normalize(self) -> ApiError {
        serde_json::Value::String(self).normalize()
    }
}

impl Normalize for &str {
    fn normalize(self) -> ApiError {
        self.to_owned().normalize()
    }
}

impl<C: ErrorCode> Normalize for Failure<C> {
    fn normalize(self) -> ApiError {
        match self {
            Self::Api(err) => err,
            Self::Domain(err) => err.normalize(),
            Self::Error(err) => err.normalize(),
            Self::Value(value) => value.normalize(),
        }
    }
}

fn internal(detail: String, cause: Cause) -> ApiError {
    ApiError::builder(StatusCode::INTERNAL_SERVER_ERROR, SANITIZED_TITLE, detail, SANITIZED_CODE)
        .cause(cause)
        .finish()
}

/// Strings render raw, everything else as compact JSON
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn api_error_passes_through() {
        let cause: Cause = Arc::new(std::io::Error::other("io"));
        let err = ApiError::builder(StatusCode::NOT_FOUND, "Not Found", "gone", "NOT_FOUND")
            .cause(cause.clone())
            .build().unwrap();

        let out = normalize(err);
        assert_eq!(out.status(), StatusCode::NOT_FOUND);
        assert_eq!(out.code(), "NOT_FOUND");
        assert!(Arc::ptr_eq(out.cause().unwrap(), &cause));
    }

    #[test]
    fn generic_error_becomes_internal() {
        let out = normalize(anyhow::anyhow!("x"));
        assert_eq!(out.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(out.code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(out.title(), "Internal Server Error");
        assert_eq!(out.detail(), "x");
        assert!(!out.expose());
        assert!(out.is_operational());
        assert_eq!(out.cause().unwrap().to_string(), "x");
    }

    #[test]
    fn boxed_error_becomes_internal() {
        let boxed: BoxError = Box::new(std::io::Error::other("disk full"));
        let out = normalize(boxed);
        assert_eq!(out.code(), SANITIZED_CODE);
        assert_eq!(out.detail(), "disk full");
    }

    #[test]
    fn plain_string_becomes_unknown() {
        let out = normalize("plain string");
        assert_eq!(out.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(out.code(), UNKNOWN_CODE);
        assert_eq!(out.title(), UNKNOWN_TITLE);
        assert_eq!(out.detail(), "plain string");
        assert_eq!(out.cause().unwrap().to_string(), "plain string");
    }

    #[test]
    fn plain_object_renders_as_json_text() {
        let out = normalize(json!({ "reason": "nope" }));
        assert_eq!(out.code(), UNKNOWN_CODE);
        assert_eq!(out.detail(), r#"{"reason":"nope"}"#);
    }

    #[test]
    fn domain_error_is_treated_as_generic_error() {
        let out = normalize(DomainError::new("USER_NOT_FOUND", "no user 42"));
        assert_eq!(out.code(), SANITIZED_CODE);
        assert_eq!(out.detail(), "no user 42");
    }

    #[test]
    fn failure_guards() {
        let api: Failure<&str> = ApiError::new(StatusCode::GONE, "Gone", "gone", "GONE").unwrap().into();
        assert!(api.is_api_error());
        assert_eq!(api.is_operational(), Some(true));

        let domain: Failure<&str> = DomainError::new("LOCKED", "locked").non_operational().into();
        assert!(domain.is_domain_error());
        assert_eq!(domain.as_domain_error().unwrap().code_str(), "LOCKED");
        assert_eq!(domain.is_operational(), Some(false));

        let value: Failure<&str> = "boom".into();
        assert!(!value.is_api_error());
        assert_eq!(value.is_operational(), None);
    }

    #[test]
    fn downcast_reaches_wrapped_error() {
        let failure: Failure<&str> = Failure::Error(Box::new(std::io::Error::other("io")));
        assert!(failure.downcast_ref::<std::io::Error>().is_some());
        assert!(failure.downcast_ref::<UnknownFailure>().is_none());
    }
}
