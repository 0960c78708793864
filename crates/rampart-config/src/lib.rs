#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod mapping;
pub mod output;
pub mod telemetry;

use serde::Deserialize;

pub use mapping::*;
pub use output::*;
pub use telemetry::TelemetryConfig;

/// Top-level rampart configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Domain error code to API error policies
    #[serde(default)]
    pub mapping: MappingConfig,
    /// Rendering defaults
    #[serde(default)]
    pub output: OutputConfig,
    /// Log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.mapping.default.is_none());
        assert!(config.mapping.codes.is_empty());
        assert_eq!(config.output.format, OutputFormat::JsonApi);
        assert_eq!(config.output.sanitize, None);
        assert_eq!(config.telemetry.filter, "info");
        assert!(!config.telemetry.json);
    }

    #[test]
    fn full_document() {
        let toml = r#"
            [mapping.default]
            status = 400
            title = "Bad input"

            [mapping.codes.USER_NOT_FOUND]
            status = 404
            title = "User not found"

            [mapping.codes.EMAIL_TAKEN]
            status = 409
            title = "Email already registered"
            expose = true
            links.about = "https://docs.example.com/errors/{reason}"
            source.pointer = "/data/attributes/{field}"

            [output]
            format = "problem_details"
            sanitize = false

            [telemetry]
            filter = "rampart=debug"
            json = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let default = config.mapping.default.as_ref().unwrap();
        assert_eq!(default.status, 400);
        assert_eq!(default.title, "Bad input");

        let codes: Vec<_> = config.mapping.codes.keys().map(String::as_str).collect();
        assert_eq!(codes, ["USER_NOT_FOUND", "EMAIL_TAKEN"]);

        let taken = &config.mapping.codes["EMAIL_TAKEN"];
        assert_eq!(taken.expose, Some(true));
        assert_eq!(
            taken.source.as_ref().and_then(|s| s.pointer.as_deref()),
            Some("/data/attributes/{field}")
        );
        assert_eq!(
            taken.links.as_ref().and_then(|l| l.about.as_deref()),
            Some("https://docs.example.com/errors/{reason}")
        );

        assert_eq!(config.output.format, OutputFormat::ProblemDetails);
        assert_eq!(config.output.sanitize, Some(false));
        assert_eq!(config.telemetry.filter, "rampart=debug");
        assert!(config.telemetry.json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = toml::from_str::<Config>("[output]\ncolour = true\n").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }
}
