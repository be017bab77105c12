//! Authenticated sessions for remote accounts.

pub mod credentials;
pub mod errors;
pub mod traits;
pub mod types;

pub use credentials::{CredentialEntry, CredentialsFile, CredentialsFileResolver};
pub use errors::SessionError;
pub use traits::SessionResolver;
pub use types::SessionHandle;
