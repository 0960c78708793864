//! Mapping policies compiled from configuration

use rampart_config::{MappingConfig, PolicyConfig};
use rampart_core::{DomainError, ErrorCode, Links, Meta, Source, status_from_u16};

use crate::error::MapperError;
use crate::mapper::MapperBuilder;
use crate::policy::{MappingPolicy, Overrides};
use crate::template::Template;

const DEFAULT_POLICY_NAME: &str = "default";

#[derive(Debug, Default)]
struct PolicyTemplates {
    about: Option<Template>,
    type_: Option<Template>,
    pointer: Option<Template>,
    parameter: Option<Template>,
    header: Option<Template>,
}

impl PolicyTemplates {
    fn compile(code: &str, config: &PolicyConfig) -> Result<Self, MapperError> {
        let mut templates = Self::default();

        for (field, raw) in config.templates() {
            let template = Template::parse(raw).map_err(|source| MapperError::Template {
                code: code.to_string(),
                field,
                source,
            })?;

            let slot = match field {
                "links.about" => &mut templates.about,
                "links.type" => &mut templates.type_,
                "source.pointer" => &mut templates.pointer,
                "source.parameter" => &mut templates.parameter,
                _ => &mut templates.header,
            };
            *slot = Some(template);
        }

        Ok(templates)
    }

    const fn is_empty(&self) -> bool {
        self.about.is_none()
            && self.type_.is_none()
            && self.pointer.is_none()
            && self.parameter.is_none()
            && self.header.is_none()
    }

    fn overrides(&self, meta: Option<&Meta>) -> Overrides {
        let render = |template: Option<&Template>| template.and_then(|t| t.render_meta(meta));

        let links = Links {
            about: render(self.about.as_ref()),
            type_: render(self.type_.as_ref()),
        };
        let source = Source {
            pointer: render(self.pointer.as_ref()),
            parameter: render(self.parameter.as_ref()),
            header: render(self.header.as_ref()),
            extra: Meta::new(),
        };

        Overrides {
            links: (links != Links::default()).then_some(links),
            source: (source != Source::default()).then_some(source),
            ..Overrides::default()
        }
    }
}

impl<C: ErrorCode> MappingPolicy<C> {
    /// Compile a configured policy
    ///
    /// Templated `links` and `source` fields are filled from the domain
    /// error's metadata; a field whose placeholders cannot all be filled
    /// is left out.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError`] for a status outside 100-599 or a malformed
    /// template
    pub fn from_config(code: &str, config: &PolicyConfig) -> Result<Self, MapperError> {
        let status = status_from_u16(config.status).map_err(|_| MapperError::InvalidStatus {
            code: code.to_string(),
            status: config.status,
        })?;

        let mut policy = Self::new(status, config.title.as_str());
        if let Some(expose) = config.expose {
            policy = policy.with_expose(expose);
        }

        let templates = PolicyTemplates::compile(code, config)?;
        if !templates.is_empty() {
            policy = policy.with_build(move |err: &DomainError<C>| templates.overrides(err.meta()));
        }

        Ok(policy)
    }
}

impl<C: ErrorCode> MapperBuilder<C> {
    /// Builder preloaded with every configured policy
    ///
    /// Programmatic policies, adapters and an unknown handler can be
    /// layered on afterwards; a later [`MapperBuilder::policy`] call for the
    /// same code replaces the configured one.
    ///
    /// # Errors
    ///
    /// Returns the first [`MapperError`] among the configured policies
    pub fn from_config(config: &MappingConfig) -> Result<Self, MapperError> {
        let mut builder = Self::new();

        if let Some(ref default) = config.default {
            builder = builder.default_policy(MappingPolicy::from_config(DEFAULT_POLICY_NAME, default)?);
        }

        for (code, policy) in &config.codes {
            builder = builder.policy(code, MappingPolicy::from_config(code, policy)?);
        }

        tracing::debug!(codes = config.codes.len(), "compiled mapping policies");

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use rampart_core::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::Mapper;
    use crate::error::TemplateError;

    fn config(toml: &str) -> MappingConfig {
        toml::from_str(toml).unwrap()
    }

    fn meta(value: serde_json::Value) -> Meta {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn compiles_codes_and_default() {
        let config = config(
            r#"
            [default]
            status = 409
            title = "Rejected"
            expose = false

            [codes.USER_NOT_FOUND]
            status = 404
            title = "User not found"
            "#,
        );

        let mapper: Mapper<String> = MapperBuilder::from_config(&config).unwrap().build();
        assert_eq!(mapper.codes().collect::<Vec<_>>(), ["USER_NOT_FOUND"]);

        let found = mapper.map(DomainError::new("USER_NOT_FOUND".to_string(), "no user")).into_single().unwrap();
        assert_eq!(found.status(), StatusCode::NOT_FOUND);

        let other = mapper.map(DomainError::new("OTHER".to_string(), "other")).into_single().unwrap();
        assert_eq!(other.status(), StatusCode::CONFLICT);
        assert_eq!(other.title(), "Rejected");
        assert!(!other.expose());
    }

    #[test]
    fn templates_fill_from_meta() {
        let config = config(
            r#"
            [codes.VAL_ERR]
            status = 422
            title = "Validation Failed"
            source.pointer = "/data/attributes/{field}"
            links.about = "https://docs.example.com/errors/{rule}"
            "#,
        );
        let mapper: Mapper<&str> = MapperBuilder::from_config(&config).unwrap().build();

        let err = DomainError::new("VAL_ERR", "Bad email").with_meta(meta(json!({ "field": "email", "rule": "format" })));
        let api = mapper.map(err).into_single().unwrap();

        assert_eq!(api.source().unwrap().pointer.as_deref(), Some("/data/attributes/email"));
        assert_eq!(
            api.links().unwrap().about.as_deref(),
            Some("https://docs.example.com/errors/format")
        );
        assert_eq!(api.meta().unwrap()["field"], "email");
    }

    #[test]
    fn unresolved_placeholder_omits_field() {
        let config = config(
            r#"
            [codes.VAL_ERR]
            status = 422
            title = "Validation Failed"
            source.pointer = "/data/attributes/{field}"
            links.about = "https://docs.example.com/errors/validation"
            "#,
        );
        let mapper: Mapper<&str> = MapperBuilder::from_config(&config).unwrap().build();

        let api = mapper.map(DomainError::new("VAL_ERR", "Bad input")).into_single().unwrap();
        assert!(api.source().is_none());
        assert_eq!(
            api.links().unwrap().about.as_deref(),
            Some("https://docs.example.com/errors/validation")
        );
    }

    #[test]
    fn programmatic_policy_replaces_configured_one() {
        let config = config("[codes.LOCKED]\nstatus = 423\ntitle = \"Locked\"");
        let mapper: Mapper<&str> = MapperBuilder::from_config(&config)
            .unwrap()
            .map_code("LOCKED", StatusCode::CONFLICT, "Busy")
            .build();
        assert_eq!(mapper.policy_for("LOCKED").status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_status_is_reported() {
        let config = config("[codes.TEAPOT]\nstatus = 99\ntitle = \"Tea\"");
        let err = MapperBuilder::<&str>::from_config(&config).unwrap_err();
        assert_eq!(
            err,
            MapperError::InvalidStatus {
                code: "TEAPOT".to_string(),
                status: 99
            }
        );
    }

    #[test]
    fn malformed_template_is_reported() {
        let config = config("[default]\nstatus = 400\ntitle = \"Bad\"\nsource.header = \"X-{name\"");
        let err = MapperBuilder::<&str>::from_config(&config).unwrap_err();
        assert_eq!(
            err,
            MapperError::Template {
                code: "default".to_string(),
                field: "source.header",
                source: TemplateError {
                    template: "X-{name".to_string(),
                    reason: "unclosed or nested `{`",
                },
            }
        );
        assert_eq!(
            err.to_string(),
            "policy `default` field `source.header`: malformed template `X-{name`: unclosed or nested `{`"
        );
    }
}
