//! Mapping of fetch failures onto refresh outcomes.
//!
//! Exactly two failure kinds are not fatal: "not modified" (the cache is
//! current) and "service unavailable" (maintenance window). Everything else
//! is fatal for the account. Nothing is retried here; the next tick is the
//! retry.

use std::any::Any;

use crate::capabilities::FetchError;
use crate::refresh::errors::RefreshError;
use crate::refresh::types::RefreshOutcome;
use crate::session::SessionError;

pub const HTTP_NOT_MODIFIED: u16 = 304;
pub const HTTP_SERVICE_UNAVAILABLE: u16 = 503;

pub fn classify(error: FetchError) -> RefreshOutcome {
    match error {
        FetchError::HttpStatus {
            status: HTTP_NOT_MODIFIED,
            ..
        } => RefreshOutcome::Unchanged,
        FetchError::HttpStatus {
            status: HTTP_SERVICE_UNAVAILABLE,
            ..
        } => RefreshOutcome::ServerUnavailable,
        FetchError::HttpStatus { status, message } => {
            RefreshOutcome::Fatal(RefreshError::Protocol { status, message })
        }
        FetchError::Transport { message } => {
            RefreshOutcome::Fatal(RefreshError::Transport { message })
        }
        FetchError::InvalidResponse { message } => {
            RefreshOutcome::Fatal(RefreshError::Transport { message })
        }
        FetchError::Session {
            source: source @ SessionError::NotFound { .. },
        } => RefreshOutcome::Fatal(RefreshError::SessionNotFound { source }),
        FetchError::Session { source } => {
            RefreshOutcome::Fatal(RefreshError::CredentialsUnavailable { source })
        }
    }
}

/// Classify a panic payload caught while refreshing an account.
pub fn classify_panic(payload: Box<dyn Any + Send>) -> RefreshOutcome {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    RefreshOutcome::Fatal(RefreshError::Unclassified { message })
}
