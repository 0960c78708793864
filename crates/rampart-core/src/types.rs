use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Non-standard extension data attached to an error
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Underlying failure kept for local diagnostics, never serialized
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Reference to the part of the request that caused the error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// JSON Pointer (RFC 6901) into the request document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Name of the offending URI query parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Name of the offending request header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Any additional members
    #[serde(flatten)]
    pub extra: Meta,
}

impl Source {
    /// Source pointing into the request document
    pub fn pointer(pointer: impl Into<String>) -> Self {
        Self {
            pointer: Some(pointer.into()),
            ..Self::default()
        }
    }

    /// Source naming a query parameter
    pub fn parameter(parameter: impl Into<String>) -> Self {
        Self {
            parameter: Some(parameter.into()),
            ..Self::default()
        }
    }

    /// Source naming a request header
    pub fn header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::default()
        }
    }
}

/// Links to further information about an error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Details about this particular occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Type definition for the error
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

impl Links {
    /// Links with only an `about` URI
    pub fn about(about: impl Into<String>) -> Self {
        Self {
            about: Some(about.into()),
            type_: None,
        }
    }
}
