//! Port to the platform's periodic task scheduler.

use chrono::{DateTime, Utc};

use crate::schedule::errors::ScheduleError;
use crate::schedule::types::{ExistingPolicy, PeriodicRequest, Registration, RunRecord};

/// A scheduler that runs at most one instance of each named trigger at a
/// time and honours the trigger's constraints.
pub trait SchedulingPort: Send + Sync {
    fn enqueue_unique_periodic(
        &self,
        request: &PeriodicRequest,
        policy: ExistingPolicy,
    ) -> Result<(), ScheduleError>;

    /// Remove every trigger registered under `name`. Returns how many were
    /// removed; zero is not an error.
    fn cancel_unique(&self, name: &str) -> Result<usize, ScheduleError>;

    fn registration(&self, name: &str) -> Result<Option<Registration>, ScheduleError>;

    fn registration_count(&self, name: &str) -> Result<usize, ScheduleError>;

    /// Remember the outcome of a tick. Unknown names are ignored.
    fn record_run(&self, name: &str, record: &RunRecord) -> Result<(), ScheduleError>;

    /// Whether `name` is registered and a full interval has passed since
    /// its last recorded run.
    fn is_due(&self, name: &str, now: DateTime<Utc>) -> Result<bool, ScheduleError> {
        Ok(self
            .registration(name)?
            .is_some_and(|registration| registration.is_due(now)))
    }
}
