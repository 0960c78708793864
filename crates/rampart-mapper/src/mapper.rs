use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rampart_core::{ApiError, DomainError, ErrorCode, Failure, StatusCode};

use crate::mapped::Mapped;
use crate::policy::MappingPolicy;

/// Translates a failure the mapper has no policy for
///
/// Returning `None`, or an empty [`Mapped::Many`], passes the failure on.
pub type Adapter<C> = Arc<dyn Fn(&Failure<C>) -> Option<Mapped> + Send + Sync>;

/// Last resort for failures no adapter handled
///
/// An empty [`Mapped::Many`] counts as unhandled, so the failure still
/// becomes the opaque 500.
pub type UnknownHandler<C> = Arc<dyn Fn(&Failure<C>) -> Mapped + Send + Sync>;

/// Turns any failure into one or more API errors
///
/// Resolution order, first match wins:
///
/// 1. an [`ApiError`] is returned unchanged
/// 2. a [`DomainError`] goes through the policy registered for its code,
///    or the default policy
/// 3. adapters, in registration order
/// 4. the unknown handler, unless it returns no errors
/// 5. an opaque, non-exposed, non-operational 500
///
/// Every failure maps to at least one error.
///
/// Immutable after [`MapperBuilder::build`]; share it behind an `Arc`.
pub struct Mapper<C: ErrorCode> {
    policies: IndexMap<String, MappingPolicy<C>>,
    default_policy: MappingPolicy<C>,
    adapters: Vec<Adapter<C>>,
    unknown_handler: Option<UnknownHandler<C>>,
}

impl<C: ErrorCode> Mapper<C> {
    pub fn builder() -> MapperBuilder<C> {
        MapperBuilder::new()
    }

    /// Map any failure
    pub fn map(&self, failure: impl Into<Failure<C>>) -> Mapped {
        match failure.into() {
            Failure::Api(err) => Mapped::One(err),
            Failure::Domain(err) => Mapped::One(self.map_domain(&err)),
            other => self.map_unknown(other),
        }
    }

    /// Map a domain error through its policy
    pub fn map_domain(&self, err: &DomainError<C>) -> ApiError {
        let policy = self.policy_for(err.code_str());
        let api = policy.apply(err);

        tracing::debug!(
            code = err.code_str(),
            status = api.status().as_u16(),
            "mapped domain error"
        );

        api
    }

    /// Policy registered for `code`, or the default one
    pub fn policy_for(&self, code: &str) -> &MappingPolicy<C> {
        self.policies.get(code).unwrap_or_else(|| {
            tracing::debug!(code, "no policy for code, using default");
            &self.default_policy
        })
    }

    pub const fn default_policy(&self) -> &MappingPolicy<C> {
        &self.default_policy
    }

    /// Codes with a dedicated policy, in registration order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.policies.contains_key(code)
    }

    fn map_unknown(&self, failure: Failure<C>) -> Mapped {
        for (index, adapter) in self.adapters.iter().enumerate() {
            if let Some(mapped) = adapter(&failure)
                && !mapped.is_empty()
            {
                tracing::debug!(adapter = index, count = mapped.len(), "adapter handled failure");
                return mapped;
            }
        }

        if let Some(handler) = &self.unknown_handler {
            let mapped = handler(&failure);
            if !mapped.is_empty() {
                tracing::debug!(count = mapped.len(), "unknown handler handled failure");
                return mapped;
            }
            tracing::debug!("unknown handler returned no errors");
        }

        tracing::warn!(failure = ?failure, "unmapped failure collapsed to internal server error");

        Mapped::One(internal_error(failure))
    }
}

impl<C: ErrorCode> Default for Mapper<C> {
    fn default() -> Self {
        MapperBuilder::new().build()
    }
}

impl<C: ErrorCode> fmt::Debug for Mapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("policies", &self.policies)
            .field("default_policy", &self.default_policy)
            .field("adapters", &self.adapters.len())
            .field("unknown_handler", &self.unknown_handler.is_some())
            .finish()
    }
}

fn internal_error<C: ErrorCode>(failure: Failure<C>) -> ApiError {
    ApiError::opaque(failure.into_cause())
}

/// Builder for [`Mapper`]
#[must_use]
pub struct MapperBuilder<C: ErrorCode> {
    pub(crate) policies: IndexMap<String, MappingPolicy<C>>,
    pub(crate) default_policy: Option<MappingPolicy<C>>,
    adapters: Vec<Adapter<C>>,
    unknown_handler: Option<UnknownHandler<C>>,
}

impl<C: ErrorCode> MapperBuilder<C> {
    pub fn new() -> Self {
        Self {
            policies: IndexMap::new(),
            default_policy: None,
            adapters: Vec::new(),
            unknown_handler: None,
        }
    }

    /// Register the policy for a code, replacing any earlier one
    pub fn policy(mut self, code: impl AsRef<str>, policy: MappingPolicy<C>) -> Self {
        self.policies.insert(code.as_ref().to_string(), policy);
        self
    }

    /// Register a plain status and title for a code
    pub fn map_code(self, code: impl AsRef<str>, status: StatusCode, title: impl Into<String>) -> Self {
        self.policy(code, MappingPolicy::new(status, title))
    }

    /// Policy for codes without their own; `400 Application error` if unset
    pub fn default_policy(mut self, policy: MappingPolicy<C>) -> Self {
        self.default_policy = Some(policy);
        self
    }

    /// Append an adapter for failures that are neither API nor domain errors
    pub fn adapter<F>(mut self, adapter: F) -> Self
    where
        F: Fn(&Failure<C>) -> Option<Mapped> + Send + Sync + 'static,
    {
        self.adapters.push(Arc::new(adapter));
        self
    }

    pub fn unknown_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Failure<C>) -> Mapped + Send + Sync + 'static,
    {
        self.unknown_handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Mapper<C> {
        Mapper {
            policies: self.policies,
            default_policy: self.default_policy.unwrap_or_default(),
            adapters: self.adapters,
            unknown_handler: self.unknown_handler,
        }
    }
}

impl<C: ErrorCode> fmt::Debug for MapperBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperBuilder")
            .field("policies", &self.policies)
            .field("default_policy", &self.default_policy)
            .field("adapters", &self.adapters.len())
            .field("unknown_handler", &self.unknown_handler.is_some())
            .finish()
    }
}

impl<C: ErrorCode> Default for MapperBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
