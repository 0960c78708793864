use thiserror::Error;

/// A `{key}` template that cannot be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed template `{template}`: {reason}")]
pub struct TemplateError {
    pub template: String,
    pub reason: &'static str,
}

/// Errors from turning configuration into mapping policies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// Status outside 100-599
    #[error("policy `{code}` has invalid status {status}")]
    InvalidStatus { code: String, status: u16 },

    /// A templated field failed to compile
    #[error("policy `{code}` field `{field}`: {source}")]
    Template {
        code: String,
        field: &'static str,
        #[source]
        source: TemplateError,
    },
}
