use std::fmt;
use std::sync::Arc;

use rampart_core::{ApiError, Cause, DomainError, ErrorCode, HeaderMap, Links, Meta, Source, StatusCode};

/// Title of the policy used when no code-specific one exists
pub const DEFAULT_POLICY_TITLE: &str = "Application error";

/// Per-instance customisation hook of a [`MappingPolicy`]
pub type BuildFn<C> = Arc<dyn Fn(&DomainError<C>) -> Overrides + Send + Sync>;

/// Field overrides produced for one domain error
///
/// Unset fields fall back to the policy and the domain error.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces the domain error's own metadata
    pub meta: Option<Meta>,
    pub source: Option<Source>,
    pub headers: Option<HeaderMap>,
    pub id: Option<String>,
    pub links: Option<Links>,
    pub cause: Option<Cause>,
    /// Takes precedence over the policy's exposure
    pub expose: Option<bool>,
}

/// How one domain error code becomes an [`ApiError`]
pub struct MappingPolicy<C: ErrorCode> {
    status: StatusCode,
    title: String,
    expose: Option<bool>,
    build: Option<BuildFn<C>>,
}

impl<C: ErrorCode> MappingPolicy<C> {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            expose: None,
            build: None,
        }
    }

    /// Fix exposure for every error mapped by this policy
    #[must_use]
    pub const fn with_expose(mut self, expose: bool) -> Self {
        self.expose = Some(expose);
        self
    }

    /// Derive per-instance overrides from the domain error
    #[must_use]
    pub fn with_build<F>(mut self, build: F) -> Self
    where
        F: Fn(&DomainError<C>) -> Overrides + Send + Sync + 'static,
    {
        self.build = Some(Arc::new(build));
        self
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn expose(&self) -> Option<bool> {
        self.expose
    }

    /// Overrides for `err`, empty when the policy has no build hook
    pub fn overrides(&self, err: &DomainError<C>) -> Overrides {
        self.build.as_ref().map(|build| build(err)).unwrap_or_default()
    }

    /// Build the API error for `err`
    ///
    /// Status and title come from the policy, detail and code from the
    /// domain error. Overrides win over the domain error's metadata and
    /// over the policy's exposure. A policy status outside 100-599 yields
    /// the opaque 500 instead.
    pub fn apply(&self, err: &DomainError<C>) -> ApiError {
        let Overrides {
            meta,
            source,
            headers,
            id,
            links,
            cause,
            expose,
        } = self.overrides(err);

        ApiError::builder(self.status, self.title.as_str(), err.message(), err.code_str())
            .meta(meta.or_else(|| err.meta().cloned()))
            .source(source)
            .headers(headers.unwrap_or_default())
            .id(id)
            .links(links)
            .cause(cause)
            .expose(expose.or(self.expose))
            .operational(err.is_operational())
            .build()
            .unwrap_or_else(|invalid| {
                tracing::warn!(code = err.code_str(), error = %invalid, "policy status rejected");
                ApiError::opaque(Arc::new(invalid) as Cause)
            })
    }
}

impl<C: ErrorCode> Default for MappingPolicy<C> {
    fn default() -> Self {
        Self::new(StatusCode::BAD_REQUEST, DEFAULT_POLICY_TITLE)
    }
}

impl<C: ErrorCode> Clone for MappingPolicy<C> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            title: self.title.clone(),
            expose: self.expose,
            build: self.build.clone(),
        }
    }
}

impl<C: ErrorCode> fmt::Debug for MappingPolicy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingPolicy")
            .field("status", &self.status)
            .field("title", &self.title)
            .field("expose", &self.expose)
            .field("build", &self.build.is_some())
            .finish()
    }
}
