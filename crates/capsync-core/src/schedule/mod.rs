//! Periodic trigger registration.
//!
//! [`ScheduleManager`] is the boundary the host's scheduler sees: it
//! registers the trigger, removes it, and runs a tick when the trigger
//! fires. The scheduler itself sits behind [`SchedulingPort`].

pub mod constraints;
pub mod errors;
pub mod file;
pub mod manager;
pub mod memory;
pub mod registry;
pub mod traits;
pub mod types;

pub use constraints::network_available;
pub use errors::ScheduleError;
pub use file::FileScheduler;
pub use manager::ScheduleManager;
pub use memory::MemoryScheduler;
pub use registry::ScheduleRegistry;
pub use traits::SchedulingPort;
pub use types::{Constraints, ExistingPolicy, PeriodicRequest, Registration, ScheduleState};
