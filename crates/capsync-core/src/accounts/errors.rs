use crate::accounts::types::AccountId;
use crate::errors::CapsyncError;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Account '{id}' not found")]
    NotFound { id: AccountId },

    #[error("Account '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Invalid account name: cannot be empty")]
    InvalidName,

    #[error("Accounts file corrupted: {message}")]
    LoadCorrupted { message: String },

    #[error("Failed to save accounts: {message}")]
    SaveFailed { message: String },

    #[error("Account store lock poisoned")]
    LockPoisoned,

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CapsyncError for AccountError {
    fn error_code(&self) -> &'static str {
        match self {
            AccountError::NotFound { .. } => "ACCOUNT_NOT_FOUND",
            AccountError::AlreadyExists { .. } => "ACCOUNT_ALREADY_EXISTS",
            AccountError::InvalidName => "INVALID_ACCOUNT_NAME",
            AccountError::LoadCorrupted { .. } => "ACCOUNTS_LOAD_CORRUPTED",
            AccountError::SaveFailed { .. } => "ACCOUNTS_SAVE_FAILED",
            AccountError::LockPoisoned => "ACCOUNTS_LOCK_POISONED",
            AccountError::IoError { .. } => "ACCOUNTS_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            AccountError::NotFound { .. }
            | AccountError::AlreadyExists { .. }
            | AccountError::InvalidName => true,

            AccountError::LoadCorrupted { .. }
            | AccountError::SaveFailed { .. }
            | AccountError::LockPoisoned
            | AccountError::IoError { .. } => false,
        }
    }
}
