//! Stand-in for a schema validation library's multi-field report

use rampart_core::{ApiError, Failure, ErrorCode, Source, StatusCode};
use rampart_mapper::Mapped;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Issue {
    pub path: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Error)]
#[error("{} validation issues", .issues.len())]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new<'a>(issues: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            issues: issues
                .into_iter()
                .map(|(path, message)| Issue {
                    path: path.split('.').map(str::to_owned).collect(),
                    message: message.to_owned(),
                })
                .collect(),
        }
    }
}

/// One 422 per issue, pointing at the offending attribute
pub fn validation_adapter<C: ErrorCode>(failure: &Failure<C>) -> Option<Mapped> {
    let report = failure.downcast_ref::<ValidationReport>()?;

    let errors = report
        .issues
        .iter()
        .map(|issue| {
            ApiError::builder(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Failed",
                issue.message.clone(),
                "VALIDATION_FAILED",
            )
            .source(Source::pointer(format!("/data/attributes/{}", issue.path.join("/"))))
            .build()
        })
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    Some(Mapped::Many(errors))
}
