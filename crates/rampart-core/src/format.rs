//! Render API errors into wire documents
//!
//! Each error decides its own sanitization unless the options force it.

use crate::ApiError;
use crate::wire::{JsonApiErrorDocument, ProblemDetails};

/// Rendering options shared by every formatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Force sanitization on or off; `None` defers to each error
    pub sanitize: Option<bool>,
}

impl FormatOptions {
    /// Hide every error's content regardless of its own policy
    pub const fn sanitized() -> Self {
        Self { sanitize: Some(true) }
    }

    /// Show every error's content regardless of its own policy
    pub const fn unsanitized() -> Self {
        Self { sanitize: Some(false) }
    }
}

/// Render one or many errors as a JSON:API error document, preserving order
pub fn format_json_api_document<E>(errors: &E, options: FormatOptions) -> JsonApiErrorDocument
where
    E: AsRef<[ApiError]> + ?Sized,
{
    JsonApiErrorDocument {
        errors: errors
            .as_ref()
            .iter()
            .map(|err| err.to_json_api_object(options.sanitize))
            .collect(),
    }
}

/// Render a single error as a Problem Details object
pub fn format_problem_details(error: &ApiError, options: FormatOptions) -> ProblemDetails {
    error.to_problem_details(options.sanitize)
}
