use crate::accounts::AccountError;
use crate::errors::CapsyncError;
use crate::session::SessionError;

/// Why refreshing one account failed.
///
/// Every variant is fatal for that account's tick and turns the job result
/// into a failure; none of them stop other accounts from being refreshed.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("No session for account: {source}")]
    SessionNotFound { source: SessionError },

    /// The credential store itself could not be read, as opposed to having
    /// no entry for the account.
    #[error("Credentials unavailable: {source}")]
    CredentialsUnavailable { source: SessionError },

    #[error("Server responded with HTTP {status}: {message}")]
    Protocol { status: u16, message: String },

    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("Failed to write '{field}' for account: {source}")]
    PersistenceWrite {
        field: &'static str,
        source: AccountError,
    },

    #[error("Server unavailable for {count} consecutive ticks")]
    UnavailableEscalated { count: u32 },

    #[error("Unexpected failure: {message}")]
    Unclassified { message: String },
}

impl CapsyncError for RefreshError {
    fn error_code(&self) -> &'static str {
        match self {
            RefreshError::SessionNotFound { .. } => "REFRESH_SESSION_NOT_FOUND",
            RefreshError::CredentialsUnavailable { .. } => "REFRESH_CREDENTIALS_UNAVAILABLE",
            RefreshError::Protocol { .. } => "REFRESH_PROTOCOL_ERROR",
            RefreshError::Transport { .. } => "REFRESH_TRANSPORT_ERROR",
            RefreshError::PersistenceWrite { .. } => "REFRESH_PERSISTENCE_WRITE_ERROR",
            RefreshError::UnavailableEscalated { .. } => "REFRESH_UNAVAILABLE_ESCALATED",
            RefreshError::Unclassified { .. } => "REFRESH_UNCLASSIFIED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            RefreshError::SessionNotFound { .. } => true,
            RefreshError::CredentialsUnavailable { source } => source.is_user_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountId;

    #[test]
    fn test_persistence_write_display() {
        let error = RefreshError::PersistenceWrite {
            field: "brand_color",
            source: AccountError::NotFound { id: AccountId(2) },
        };
        assert_eq!(
            error.to_string(),
            "Failed to write 'brand_color' for account: Account '2' not found"
        );
        assert_eq!(error.error_code(), "REFRESH_PERSISTENCE_WRITE_ERROR");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_session_not_found_is_user_error() {
        let error = RefreshError::SessionNotFound {
            source: SessionError::NotFound {
                account_name: "a@b".to_string(),
                reason: "no credentials stored".to_string(),
            },
        };
        assert_eq!(error.error_code(), "REFRESH_SESSION_NOT_FOUND");
        assert!(error.is_user_error());
    }
}
