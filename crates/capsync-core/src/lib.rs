//! capsync-core: Core library for periodic server capabilities refresh
//!
//! Once per scheduled tick, every configured remote account asks its
//! server for capabilities (brand colour, notes API version, direct
//! editing support) and display name, and the cached copies are updated.
//! Cache validation tokens keep unchanged servers cheap to poll.
//!
//! # Main Entry Points
//!
//! - [`refresh`] - Run a tick across all accounts
//! - [`schedule`] - Register and remove the periodic trigger
//! - [`accounts`] - Persisted account records
//! - [`capabilities`] - Server capabilities API
//! - [`config`] - Configuration management

pub mod accounts;
pub mod capabilities;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod refresh;
pub mod schedule;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use accounts::{Account, AccountError, AccountId, AccountStore, JsonAccountStore};
pub use capabilities::{CapabilitiesApi, CapabilitiesSnapshot, HttpCapabilitiesApi};
pub use config::{CapsyncConfig, Config};
pub use errors::CapsyncError;
pub use refresh::{
    AccountRefreshCoordinator, CancelFlag, CapabilitiesFetcher, JobResult, RefreshError,
    RefreshOutcome, TickReport,
};
pub use schedule::{FileScheduler, ScheduleManager, SchedulingPort};
pub use session::{CredentialsFileResolver, SessionHandle, SessionResolver};

// Re-export logging initialization
pub use logging::init_logging;
