use std::fmt;

use http::StatusCode;

use crate::ApiError;
use crate::normalize::Normalize;

/// Statuses a client may retry even without an explicit flag
const RETRYABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Broad category for the logging layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Expected, recoverable condition
    Operational,
    /// Defect in the program
    Programmer,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Operational => "operational",
            Self::Programmer => "programmer",
        })
    }
}

/// Whether the flag is set or the status is transient (429, 502, 503, 504)
pub fn is_retryable(error: &ApiError) -> bool {
    error.retryable() || RETRYABLE_STATUSES.contains(&error.status())
}

/// Normalize a failure and classify it by its operational flag
pub fn classify(failure: impl Normalize) -> ErrorClass {
    if failure.normalize().is_operational() {
        ErrorClass::Operational
    } else {
        ErrorClass::Programmer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_flag_wins() {
        let err = ApiError::builder(StatusCode::INTERNAL_SERVER_ERROR, "Error", "pff", "ERR")
            .retryable(true)
            .build().unwrap();
        assert!(is_retryable(&err));
    }

    #[test]
    fn transient_statuses_are_retryable() {
        for status in RETRYABLE_STATUSES {
            assert!(is_retryable(&ApiError::new(status, "t", "d", "C").unwrap()), "{status}");
        }
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!is_retryable(&ApiError::new(StatusCode::BAD_REQUEST, "Bad Request", "Bad", "BAD").unwrap()));
    }

    #[test]
    fn classifies_by_operational_flag() {
        let operational = ApiError::new(StatusCode::BAD_REQUEST, "Bad Request", "Bad", "BAD").unwrap();
        assert_eq!(classify(operational), ErrorClass::Operational);

        let defect = ApiError::builder(StatusCode::INTERNAL_SERVER_ERROR, "Crash", "Boom", "CRASH")
            .operational(false)
            .build().unwrap();
        assert_eq!(classify(defect), ErrorClass::Programmer);
        assert_eq!(ErrorClass::Programmer.to_string(), "programmer");
    }

    #[test]
    fn normalized_unknowns_are_operational() {
        assert_eq!(classify(anyhow::anyhow!("Unknown")), ErrorClass::Operational);
    }
}
