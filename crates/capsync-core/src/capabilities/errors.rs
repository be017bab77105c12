use crate::errors::CapsyncError;
use crate::session::SessionError;

/// Failure of a single capabilities or display-name request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Session unavailable: {source}")]
    Session {
        #[from]
        source: SessionError,
    },

    #[error("Server responded with HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("Invalid server response: {message}")]
    InvalidResponse { message: String },
}

impl CapsyncError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::Session { .. } => "FETCH_SESSION_UNAVAILABLE",
            FetchError::HttpStatus { .. } => "FETCH_HTTP_STATUS",
            FetchError::Transport { .. } => "FETCH_TRANSPORT",
            FetchError::InvalidResponse { .. } => "FETCH_INVALID_RESPONSE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, FetchError::Session { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => FetchError::HttpStatus {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => FetchError::Transport {
                message: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let error = FetchError::HttpStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Server responded with HTTP 500: Internal Server Error"
        );
        assert_eq!(error.error_code(), "FETCH_HTTP_STATUS");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_session_error_converts() {
        let error: FetchError = SessionError::NotFound {
            account_name: "a".to_string(),
            reason: "missing".to_string(),
        }
        .into();
        assert!(matches!(error, FetchError::Session { .. }));
        assert!(error.is_user_error());
    }
}
