use crate::session::errors::SessionError;
use crate::session::types::SessionHandle;

/// Resolves the authenticated session of an account.
///
/// Fails with [`SessionError::NotFound`] when the account's credentials are
/// missing or unusable.
pub trait SessionResolver: Send + Sync {
    fn resolve_session(&self, account_name: &str) -> Result<SessionHandle, SessionError>;
}
