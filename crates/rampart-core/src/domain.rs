use std::fmt;

use thiserror::Error;

use crate::types::Meta;

/// Stable discriminator for a kind of domain failure
///
/// Blanket-implemented for anything that renders as a string, so a closed
/// application enum (for example one deriving `strum::AsRefStr`) works as
/// well as a plain `String` or `&'static str`.
pub trait ErrorCode: AsRef<str> + fmt::Debug + Send + Sync + 'static {}

impl<T> ErrorCode for T where T: AsRef<str> + fmt::Debug + Send + Sync + 'static {}

/// Internal, application-specific failure raised before the API boundary
///
/// Immutable once built. A domain error never reaches a client as-is:
/// the mapper turns it into an [`ApiError`](crate::ApiError).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DomainError<C: ErrorCode> {
    code: C,
    message: String,
    meta: Option<Meta>,
    is_operational: bool,
}

impl<C: ErrorCode> DomainError<C> {
    /// Create an operational domain error without metadata
    pub fn new(code: C, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            meta: None,
            is_operational: true,
        }
    }

    /// Attach structured metadata
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Mark this failure as a programmer error rather than an expected condition
    #[must_use]
    pub const fn non_operational(mut self) -> Self {
        self.is_operational = false;
        self
    }

    /// Typed failure code
    pub const fn code(&self) -> &C {
        &self.code
    }

    /// Failure code as its stable string form
    pub fn code_str(&self) -> &str {
        self.code.as_ref()
    }

    /// Developer-facing message, not necessarily safe for clients
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured metadata, if any
    pub const fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// `true` for expected, recoverable conditions
    pub const fn is_operational(&self) -> bool {
        self.is_operational
    }
}
