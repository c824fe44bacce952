//! Error types for qsoecho

use http::StatusCode;
use thiserror::Error;

/// Result type for qsoecho operations
pub type Result<T> = std::result::Result<T, Error>;

/// Body returned to the caller for every rejected request.
///
/// Kept byte-for-byte with what existing clients already match on; the
/// underlying detail only goes to the server log.
pub const REJECTED_BODY: &str = "Invalid JSON: ";

/// Main error type for qsoecho
#[derive(Error, Debug)]
pub enum Error {
    /// Request body failed schema validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be read from the connection
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error is answered with
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::Transport(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent back to the client. Never contains the error detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::Validation(_) | Error::Transport(_) => REJECTED_BODY,
            _ => "Internal Server Error",
        }
    }

    /// Whether this error belongs to a single request rather than the process
    pub fn is_request_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Transport(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_map_to_bad_request() {
        let validation = Error::Validation("missing field `adif`".to_string());
        let transport = Error::Transport("connection reset".to_string());

        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(transport.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.public_message(), "Invalid JSON: ");
        assert_eq!(transport.public_message(), "Invalid JSON: ");
        assert!(validation.is_request_error());
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = Error::Validation("expected i64 at line 1 column 14".to_string());
        assert!(!err.public_message().contains("line 1"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_startup_errors_are_internal() {
        let err = Error::Config("bad listen".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_request_error());
    }

    #[test]
    fn test_json_error_becomes_validation() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Validation(_)));
    }
}
