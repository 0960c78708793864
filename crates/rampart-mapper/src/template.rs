//! `{key}` templates filled from domain error metadata

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rampart_core::Meta;
use serde_json::Value;

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Key(String),
}

/// A string with `{key}` placeholders
///
/// Keys may contain letters, digits, `_`, `-` and `.`. Braces have no
/// escape form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("must be valid regex"))
}

fn key_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("must be valid regex"))
}

impl Template {
    /// Compile a template
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for stray or nested braces and for empty
    /// or invalid keys
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let malformed = |reason| TemplateError {
            template: raw.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut cursor = 0;

        for captures in placeholder().captures_iter(raw) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            push_literal(&mut segments, &raw[cursor..whole.start()]).map_err(malformed)?;

            let key = key.as_str().trim();
            if key.is_empty() {
                return Err(malformed("empty placeholder"));
            }
            if !key_pattern().is_match(key) {
                return Err(malformed("placeholder keys may only contain letters, digits, `_`, `-` and `.`"));
            }

            segments.push(Segment::Key(key.to_string()));
            cursor = whole.end();
        }

        push_literal(&mut segments, &raw[cursor..]).map_err(malformed)?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Placeholder keys in order of appearance
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Key(key) => Some(key.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fill every placeholder, or `None` when any key cannot be resolved
    ///
    /// String values are inserted as-is, other JSON values as compact JSON.
    /// A `null` value counts as missing.
    pub fn render<'a>(&self, lookup: impl Fn(&str) -> Option<&'a Value>) -> Option<String> {
        let mut out = String::with_capacity(self.raw.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Key(key) => match lookup(key)? {
                    Value::Null => return None,
                    Value::String(s) => out.push_str(s),
                    other => out.push_str(&other.to_string()),
                },
            }
        }

        Some(out)
    }

    /// Fill placeholders from domain error metadata
    pub fn render_meta(&self, meta: Option<&Meta>) -> Option<String> {
        self.render(|key| meta.and_then(|m| m.get(key)))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<(), &'static str> {
    if text.contains('{') {
        return Err("unclosed or nested `{`");
    }
    if text.contains('}') {
        return Err("unmatched `}`");
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
