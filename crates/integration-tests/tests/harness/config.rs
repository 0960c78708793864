//! Programmatic and on-disk configuration for integration tests

use std::io::Write as _;

use indexmap::IndexMap;
use rampart_config::{Config, MappingConfig, PolicyConfig, SourceTemplate};
use tempfile::NamedTempFile;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                mapping: MappingConfig {
                    default: None,
                    codes: IndexMap::new(),
                },
                ..Config::default()
            },
        }
    }

    /// Map a code to a plain status and title
    pub fn with_code(mut self, code: &str, status: u16, title: &str) -> Self {
        self.config.mapping.codes.insert(code.to_owned(), policy(status, title));
        self
    }

    /// Map a code and point `source.pointer` at a templated path
    pub fn with_pointer(mut self, code: &str, status: u16, title: &str, pointer: &str) -> Self {
        let mut policy = policy(status, title);
        policy.source = Some(SourceTemplate {
            pointer: Some(pointer.to_owned()),
            ..SourceTemplate::default()
        });
        self.config.mapping.codes.insert(code.to_owned(), policy);
        self
    }

    pub fn with_default(mut self, status: u16, title: &str) -> Self {
        self.config.mapping.default = Some(policy(status, title));
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

fn policy(status: u16, title: &str) -> PolicyConfig {
    PolicyConfig {
        status,
        title: title.to_owned(),
        expose: None,
        links: None,
        source: None,
    }
}

/// Write `contents` to a temporary TOML file kept alive by the handle
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}
