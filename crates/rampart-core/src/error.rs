use http::StatusCode;
use thiserror::Error;

/// Errors raised by misuse of the error model itself
///
/// These are logic errors on the caller's side and are never rendered
/// to API clients.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RampartError {
    /// `raise` was called on a collector holding no errors
    #[error("cannot raise an empty error collector")]
    EmptyCollector,

    /// HTTP status outside the 100-599 range
    #[error("status code {0} is outside the 100-599 range")]
    InvalidStatus(u16),
}

/// Convert a raw status code, rejecting anything outside 100-599
///
/// # Errors
///
/// Returns [`RampartError::InvalidStatus`] when the code is out of range
pub fn status_from_u16(code: u16) -> Result<StatusCode, RampartError> {
    if !(100..=599).contains(&code) {
        return Err(RampartError::InvalidStatus(code));
    }

    StatusCode::from_u16(code).map_err(|_| RampartError::InvalidStatus(code))
}
