//! Error model for API boundaries
//!
//! Domain code raises [`DomainError`]s, the mapping layer turns them into
//! [`ApiError`]s, and the formatters render those as JSON:API error
//! documents or RFC 9457 Problem Details with sanitization applied.

#![allow(clippy::must_use_candidate)]

mod aggregate;
mod api_error;
mod classify;
mod collector;
mod domain;
mod error;
mod format;
pub mod http;
mod normalize;
mod types;
mod wire;

pub use aggregate::{AggregateError, DEFAULT_AGGREGATE_MESSAGE};
pub use api_error::{ABOUT_BLANK, ApiError, ApiErrorBuilder, SANITIZED_CODE, SANITIZED_DETAIL, SANITIZED_TITLE};
pub use classify::{ErrorClass, classify, is_retryable};
pub use collector::{ErrorCollector, Raised};
pub use domain::{DomainError, ErrorCode};
pub use error::{RampartError, status_from_u16};
pub use format::{FormatOptions, format_json_api_document, format_problem_details};
pub use normalize::{Failure, Normalize, UNKNOWN_CODE, UNKNOWN_TITLE, UnknownFailure, normalize};
pub use types::{Cause, Links, Meta, Source};
pub use wire::{
    JSON_API_CONTENT_TYPE, JsonApiErrorDocument, JsonApiErrorObject, PROBLEM_JSON_CONTENT_TYPE, ProblemDetails,
};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
