//! Server capabilities: data model, API port and the OCS HTTP client.

pub mod client;
pub mod errors;
pub mod parse;
pub mod traits;
pub mod types;

pub use client::HttpCapabilitiesApi;
pub use errors::FetchError;
pub use traits::CapabilitiesApi;
pub use types::{CapabilitiesResponse, CapabilitiesSnapshot};
