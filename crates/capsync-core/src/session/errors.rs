use crate::errors::CapsyncError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No valid session for account '{account_name}': {reason}")]
    NotFound {
        account_name: String,
        reason: String,
    },

    #[error("Credentials file corrupted: {message}")]
    CredentialsCorrupted { message: String },

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CapsyncError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound { .. } => "SESSION_NOT_FOUND",
            SessionError::CredentialsCorrupted { .. } => "CREDENTIALS_CORRUPTED",
            SessionError::IoError { .. } => "SESSION_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::NotFound { .. } | SessionError::CredentialsCorrupted { .. }
        )
    }
}
