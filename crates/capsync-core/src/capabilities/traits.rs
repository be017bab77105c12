use crate::capabilities::errors::FetchError;
use crate::capabilities::types::CapabilitiesResponse;
use crate::session::SessionHandle;

/// Remote API serving capabilities and user metadata.
pub trait CapabilitiesApi: Send + Sync {
    /// Conditionally fetch capabilities. `etag` is sent as the validation
    /// token when present.
    fn fetch_capabilities(
        &self,
        session: &SessionHandle,
        etag: Option<&str>,
    ) -> Result<CapabilitiesResponse, FetchError>;

    /// Fetch the human-readable display name of the session's user.
    fn fetch_display_name(&self, session: &SessionHandle) -> Result<String, FetchError>;
}
