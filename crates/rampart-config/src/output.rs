use serde::Deserialize;

/// Default rendering for the command line
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Force sanitization on or off for every error; unset defers to each error
    #[serde(default)]
    pub sanitize: Option<bool>,
}

/// Wire format for rendered errors
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `application/vnd.api+json` error document
    #[default]
    JsonApi,
    /// `application/problem+json` (RFC 9457)
    ProblemDetails,
}
