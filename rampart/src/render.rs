use rampart_config::OutputFormat;
use rampart_core::{ErrorCollector, Failure, FormatOptions, Raised, format_json_api_document, format_problem_details};
use rampart_mapper::Mapper;
use serde_json::Value;

/// Map every failure and render the result as one document
///
/// # Errors
///
/// Fails when there is nothing to render, or when Problem Details output
/// is requested for more than one error
pub fn render(
    mapper: &Mapper<String>,
    failures: Vec<Failure<String>>,
    format: OutputFormat,
    options: FormatOptions,
) -> anyhow::Result<Value> {
    let mut collector = ErrorCollector::new();

    for failure in failures {
        collector.extend(mapper.map(failure));
    }

    tracing::debug!(count = collector.count(), ?format, "rendering errors");

    let raised = collector
        .raise()
        .map_err(|_| anyhow::anyhow!("input contains no failures"))?;

    let document = match (format, raised) {
        (OutputFormat::JsonApi, raised) => serde_json::to_value(format_json_api_document(&raised, options))?,
        (OutputFormat::ProblemDetails, Raised::Single(err)) => {
            serde_json::to_value(format_problem_details(&err, options))?
        }
        (OutputFormat::ProblemDetails, Raised::Aggregate(aggregate)) => {
            anyhow::bail!(
                "problem details describe a single problem, but the input produced {} errors",
                aggregate.len()
            );
        }
    };

    Ok(document)
}

#[cfg(test)]
mod tests {
    use rampart_core::StatusCode;
    use rampart_mapper::Mapped;
    use serde_json::json;

    use super::*;
    use crate::input::failures;

    fn mapper() -> Mapper<String> {
        Mapper::builder()
            .map_code("USER_NOT_FOUND", StatusCode::NOT_FOUND, "User not found")
            .build()
    }

    #[test]
    fn json_api_document_keeps_input_order() {
        let input = failures(json!([
            { "code": "USER_NOT_FOUND", "message": "no user 42", "meta": { "id": 42 } },
            "disk on fire"
        ]));

        let document = render(&mapper(), input, OutputFormat::JsonApi, FormatOptions::default()).unwrap();
        assert_eq!(
            document,
            json!({
                "errors": [
                    {
                        "status": "404",
                        "code": "USER_NOT_FOUND",
                        "title": "User not found",
                        "detail": "no user 42",
                        "meta": { "id": 42 }
                    },
                    {
                        "status": "500",
                        "code": "INTERNAL_SERVER_ERROR",
                        "title": "Internal Server Error",
                        "detail": "An unexpected error occurred on the server."
                    }
                ]
            })
        );
    }

    #[test]
    fn problem_details_for_one_error() {
        let input = failures(json!({ "code": "USER_NOT_FOUND", "message": "no user 42", "meta": { "id": 42 } }));

        let document = render(&mapper(), input, OutputFormat::ProblemDetails, FormatOptions::default()).unwrap();
        assert_eq!(
            document,
            json!({
                "type": "about:blank",
                "title": "User not found",
                "status": 404,
                "detail": "no user 42",
                "code": "USER_NOT_FOUND",
                "id": 42
            })
        );
    }

    #[test]
    fn forced_sanitize_hides_client_errors() {
        let input = failures(json!({ "code": "USER_NOT_FOUND", "message": "no user 42" }));
        let document = render(&mapper(), input, OutputFormat::JsonApi, FormatOptions::sanitized()).unwrap();
        assert_eq!(document["errors"][0]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(document["errors"][0]["status"], "404");
    }

    #[test]
    fn problem_details_reject_several_errors() {
        let input = failures(json!(["a", "b"]));
        let err = render(&mapper(), input, OutputFormat::ProblemDetails, FormatOptions::default()).unwrap_err();
        assert!(err.to_string().contains("2 errors"));
    }

    #[test]
    fn failure_is_never_rendered_as_nothing() {
        let mapper = Mapper::builder().unknown_handler(|_| Mapped::Many(Vec::new())).build();
        let input = failures(json!("disk on fire"));

        let document = render(&mapper, input, OutputFormat::JsonApi, FormatOptions::default()).unwrap();
        assert_eq!(document["errors"].as_array().unwrap().len(), 1);
        assert_eq!(document["errors"][0]["status"], "500");
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = render(&mapper(), Vec::new(), OutputFormat::JsonApi, FormatOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "input contains no failures");
    }
}
