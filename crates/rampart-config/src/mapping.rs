use indexmap::IndexMap;
use serde::Deserialize;

/// Mapping table from domain error codes to policies
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Policy for codes missing from `codes`
    #[serde(default)]
    pub default: Option<PolicyConfig>,
    /// Per-code policies, in declaration order
    #[serde(default)]
    pub codes: IndexMap<String, PolicyConfig>,
}

/// Declarative mapping policy for one domain error code
///
/// Template fields may contain `{key}` placeholders that are filled from
/// the domain error's metadata when the policy is applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// HTTP status (100-599)
    pub status: u16,
    /// Human-readable summary sent to clients
    pub title: String,
    /// Whether raw detail may reach clients; unset defers to the status
    #[serde(default)]
    pub expose: Option<bool>,
    #[serde(default)]
    pub links: Option<LinksTemplate>,
    #[serde(default)]
    pub source: Option<SourceTemplate>,
}

/// Templates for the `links` member
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinksTemplate {
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
}

/// Templates for the `source` member
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceTemplate {
    /// JSON Pointer into the request document
    #[serde(default)]
    pub pointer: Option<String>,
    /// Query parameter name
    #[serde(default)]
    pub parameter: Option<String>,
    /// Request header name
    #[serde(default)]
    pub header: Option<String>,
}

impl PolicyConfig {
    /// Every template string this policy carries, with its field name
    pub fn templates(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let links = self.links.as_ref();
        let source = self.source.as_ref();

        [
            ("links.about", links.and_then(|l| l.about.as_deref())),
            ("links.type", links.and_then(|l| l.type_.as_deref())),
            ("source.pointer", source.and_then(|s| s.pointer.as_deref())),
            ("source.parameter", source.and_then(|s| s.parameter.as_deref())),
            ("source.header", source.and_then(|s| s.header.as_deref())),
        ]
        .into_iter()
        .filter_map(|(field, template)| template.map(|t| (field, t)))
    }
}
