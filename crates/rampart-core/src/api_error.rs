//! Canonical client-facing error representation
//!
//! An [`ApiError`] carries everything needed to render a response. Every
//! serialization entry point applies the sanitization policy: unless the
//! caller decides otherwise, an error with `status >= 500` or
//! `expose == false` is rendered with fixed generic title, detail and code,
//! and without `source` or `meta`. The `cause` is never part of any output.

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::error::RampartError;
use crate::types::{Cause, Links, Meta, Source};
use crate::wire::{JsonApiErrorDocument, JsonApiErrorObject, ProblemDetails};

/// Title shown in place of the real one when sanitizing
pub const SANITIZED_TITLE: &str = "Internal Server Error";
/// Detail shown in place of the real one when sanitizing
pub const SANITIZED_DETAIL: &str = "An unexpected error occurred on the server.";
/// Code shown in place of the real one when sanitizing
pub const SANITIZED_CODE: &str = "INTERNAL_SERVER_ERROR";

/// Problem type used when no `links.about` is set
pub const ABOUT_BLANK: &str = "about:blank";

/// Serializable API error
///
/// Immutable after construction; the `with_*` methods return a new value
/// with one field replaced.
#[derive(Clone)]
pub struct ApiError {
    status: StatusCode,
    title: String,
    detail: String,
    code: String,
    source: Option<Source>,
    meta: Option<Meta>,
    id: Option<String>,
    links: Option<Links>,
    tags: Vec<String>,
    retryable: bool,
    is_operational: bool,
    headers: HeaderMap,
    expose: bool,
    cause: Option<Cause>,
}

impl ApiError {
    /// Create an error with every optional field at its default
    ///
    /// # Errors
    ///
    /// Returns [`RampartError::InvalidStatus`] for a status outside 100-599
    pub fn new(
        status: StatusCode,
        title: impl Into<String>,
        detail: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self, RampartError> {
        Self::builder(status, title, detail, code).build()
    }

    /// Sanitized, non-exposed, non-operational 500 wrapping `cause`
    pub fn opaque(cause: impl Into<Option<Cause>>) -> Self {
        Self::builder(
            StatusCode::INTERNAL_SERVER_ERROR,
            SANITIZED_TITLE,
            SANITIZED_DETAIL,
            SANITIZED_CODE,
        )
        .expose(Some(false))
        .operational(false)
        .cause(cause)
        .finish()
    }

    /// Start building an error from its required fields
    pub fn builder(
        status: StatusCode,
        title: impl Into<String>,
        detail: impl Into<String>,
        code: impl Into<String>,
    ) -> ApiErrorBuilder {
        ApiErrorBuilder {
            status,
            title: title.into(),
            detail: detail.into(),
            code: code.into(),
            source: None,
            meta: None,
            id: None,
            links: None,
            tags: Vec::new(),
            retryable: false,
            is_operational: None,
            headers: HeaderMap::new(),
            expose: None,
            cause: None,
        }
    }

    /// HTTP status, always within 100-599
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Short, human-readable summary
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Explanation specific to this occurrence
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Application-specific error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Part of the request the error refers to
    pub const fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    /// Free-form metadata; becomes Problem Details extension members
    pub const fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Identifier of this occurrence
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Links with further information
    pub const fn links(&self) -> Option<&Links> {
        self.links.as_ref()
    }

    /// Labels for logging and filtering, never rendered
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether the client may retry the request
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    /// `false` marks a programmer error rather than an expected condition
    pub const fn is_operational(&self) -> bool {
        self.is_operational
    }

    /// Headers the serving layer should attach to the response
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether title, detail, code, meta and source may reach the client
    pub const fn expose(&self) -> bool {
        self.expose
    }

    /// Wrapped underlying failure, for diagnostics only
    pub const fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Whether rendering hides the real content when the caller does not decide
    pub fn sanitized_by_default(&self) -> bool {
        !self.expose || self.status.is_server_error()
    }

    /// Copy with `source` replaced
    #[must_use]
    pub fn with_source(&self, source: Source) -> Self {
        Self {
            source: Some(source),
            ..self.clone()
        }
    }

    /// Copy with `meta` replaced
    #[must_use]
    pub fn with_meta(&self, meta: Meta) -> Self {
        Self {
            meta: Some(meta),
            ..self.clone()
        }
    }

    /// Copy with `id` replaced
    #[must_use]
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..self.clone()
        }
    }

    /// Copy with `links` replaced
    #[must_use]
    pub fn with_links(&self, links: Links) -> Self {
        Self {
            links: Some(links),
            ..self.clone()
        }
    }

    /// Render as a JSON:API error object
    ///
    /// `sanitize` defaults to [`ApiError::sanitized_by_default`]. `id` and
    /// `links` are kept even when sanitizing.
    pub fn to_json_api_object(&self, sanitize: Option<bool>) -> JsonApiErrorObject {
        let sanitize = sanitize.unwrap_or_else(|| self.sanitized_by_default());

        let (title, detail, code) = if sanitize {
            (SANITIZED_TITLE, SANITIZED_DETAIL, SANITIZED_CODE)
        } else {
            (self.title.as_str(), self.detail.as_str(), self.code.as_str())
        };

        JsonApiErrorObject {
            id: self.id.clone(),
            links: self.links.clone(),
            status: Some(self.status.as_u16().to_string()),
            code: Some(code.to_owned()),
            title: Some(title.to_owned()),
            detail: Some(detail.to_owned()),
            source: if sanitize { None } else { self.source.clone() },
            meta: if sanitize { None } else { self.meta.clone() },
        }
    }

    /// Render as a single-error JSON:API document
    pub fn to_json_api_document(&self, sanitize: Option<bool>) -> JsonApiErrorDocument {
        JsonApiErrorDocument {
            errors: vec![self.to_json_api_object(sanitize)],
        }
    }

    /// Render as an RFC 9457 Problem Details object
    ///
    /// `type` is `links.about` or `about:blank`, `instance` is the `id`.
    /// Unless sanitizing, every `meta` entry becomes a top-level extension
    /// member; see [`ProblemDetails`] for how collisions resolve.
    pub fn to_problem_details(&self, sanitize: Option<bool>) -> ProblemDetails {
        let sanitize = sanitize.unwrap_or_else(|| self.sanitized_by_default());

        let type_ = self
            .links
            .as_ref()
            .and_then(|links| links.about.clone())
            .unwrap_or_else(|| ABOUT_BLANK.to_owned());

        let (title, detail, code) = if sanitize {
            (SANITIZED_TITLE, SANITIZED_DETAIL, SANITIZED_CODE)
        } else {
            (self.title.as_str(), self.detail.as_str(), self.code.as_str())
        };

        let extensions = if sanitize {
            Meta::new()
        } else {
            self.meta.clone().unwrap_or_default()
        };

        ProblemDetails {
            type_,
            title: title.to_owned(),
            status: self.status.as_u16(),
            detail: detail.to_owned(),
            instance: self.id.clone(),
            code: code.to_owned(),
            extensions,
        }
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiError")
            .field("status", &self.status)
            .field("title", &self.title)
            .field("detail", &self.detail)
            .field("code", &self.code)
            .field("source", &self.source)
            .field("meta", &self.meta)
            .field("id", &self.id)
            .field("links", &self.links)
            .field("tags", &self.tags)
            .field("retryable", &self.retryable)
            .field("is_operational", &self.is_operational)
            .field("headers", &self.headers)
            .field("expose", &self.expose)
            .field("cause", &self.cause.as_ref().map(ToString::to_string))
            .finish()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl AsRef<[Self]> for ApiError {
    fn as_ref(&self) -> &[Self] {
        std::slice::from_ref(self)
    }
}

/// Builder for [`ApiError`]
#[derive(Clone)]
#[must_use]
pub struct ApiErrorBuilder {
    status: StatusCode,
    title: String,
    detail: String,
    code: String,
    source: Option<Source>,
    meta: Option<Meta>,
    id: Option<String>,
    links: Option<Links>,
    tags: Vec<String>,
    retryable: bool,
    is_operational: Option<bool>,
    headers: HeaderMap,
    expose: Option<bool>,
    cause: Option<Cause>,
}

impl ApiErrorBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn source(mut self, source: impl Into<Option<Source>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn meta(mut self, meta: impl Into<Option<Meta>>) -> Self {
        self.meta = meta.into();
        self
    }

    pub fn id(mut self, id: impl Into<Option<String>>) -> Self {
        self.id = id.into();
        self
    }

    pub fn links(mut self, links: impl Into<Option<Links>>) -> Self {
        self.links = links.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub const fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub const fn operational(mut self, is_operational: bool) -> Self {
        self.is_operational = Some(is_operational);
        self
    }

    /// Add one response header, replacing any earlier value for the name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Explicit exposure; `None` keeps the `status < 500` default
    pub const fn expose(mut self, expose: Option<bool>) -> Self {
        self.expose = expose;
        self
    }

    pub fn cause(mut self, cause: impl Into<Option<Cause>>) -> Self {
        self.cause = cause.into();
        self
    }

    /// Finish the error
    ///
    /// # Errors
    ///
    /// Returns [`RampartError::InvalidStatus`] for a status outside 100-599,
    /// which [`StatusCode`] alone does not rule out
    pub fn build(self) -> Result<ApiError, RampartError> {
        let status = self.status.as_u16();
        if !(100..=599).contains(&status) {
            return Err(RampartError::InvalidStatus(status));
        }

        Ok(self.finish())
    }

    /// Finish without the range check; only for statuses known to be valid
    pub(crate) fn finish(self) -> ApiError {
        ApiError {
            expose: self.expose.unwrap_or(self.status.as_u16() < 500),
            is_operational: self.is_operational.unwrap_or(true),
            status: self.status,
            title: self.title,
            detail: self.detail,
            code: self.code,
            source: self.source,
            meta: self.meta,
            id: self.id,
            links: self.links,
            tags: self.tags,
            retryable: self.retryable,
            headers: self.headers,
            cause: self.cause,
        }
    }
}
