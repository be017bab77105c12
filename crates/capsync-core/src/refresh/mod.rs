//! Capabilities refresh: fetching, outcome classification and the per-tick
//! coordinator.

pub mod cancel;
pub mod classifier;
pub mod coordinator;
pub mod errors;
pub mod fetcher;
pub mod policy;
pub mod types;

pub use cancel::CancelFlag;
pub use classifier::classify;
pub use coordinator::AccountRefreshCoordinator;
pub use errors::RefreshError;
pub use fetcher::CapabilitiesFetcher;
pub use policy::{UnavailableStreaks, UnavailableTracker};
pub use types::{AccountFailure, JobResult, RefreshOutcome, TickReport};
