//! Wire shapes for rendered errors
//!
//! Absent members are omitted, never serialized as `null`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{Links, Meta, Source};

/// Media type for JSON:API documents
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";
/// Media type for RFC 9457 Problem Details
pub const PROBLEM_JSON_CONTENT_TYPE: &str = "application/problem+json";

/// JSON:API error object
///
/// See <https://jsonapi.org/format/#error-objects>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// HTTP status as a string, e.g. `"404"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// JSON:API top-level error document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiErrorDocument {
    pub errors: Vec<JsonApiErrorObject>,
}

/// RFC 9457 Problem Details object
///
/// Extension members are written after the reserved members into the same
/// JSON object. When an extension key collides with a reserved member the
/// last write wins: the extension value replaces the reserved one, and the
/// output never contains a duplicate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDetails {
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: Option<String>,
    pub code: String,
    pub extensions: Meta,
}

impl Serialize for ProblemDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = |key: &str| self.extensions.contains_key(key);

        let mut map = serializer.serialize_map(None)?;

        if !shadowed("type") {
            map.serialize_entry("type", &self.type_)?;
        }
        if !shadowed("title") {
            map.serialize_entry("title", &self.title)?;
        }
        if !shadowed("status") {
            map.serialize_entry("status", &self.status)?;
        }
        if !shadowed("detail") {
            map.serialize_entry("detail", &self.detail)?;
        }
        if let Some(ref instance) = self.instance
            && !shadowed("instance")
        {
            map.serialize_entry("instance", instance)?;
        }
        if !shadowed("code") {
            map.serialize_entry("code", &self.code)?;
        }

        for (key, value) in &self.extensions {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}
