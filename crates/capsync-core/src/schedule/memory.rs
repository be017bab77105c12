use std::sync::Mutex;

use chrono::Utc;

use crate::schedule::errors::ScheduleError;
use crate::schedule::registry::ScheduleRegistry;
use crate::schedule::traits::SchedulingPort;
use crate::schedule::types::{ExistingPolicy, PeriodicRequest, Registration, RunRecord};

/// In-process [`SchedulingPort`] for hosts that drive ticks themselves.
#[derive(Debug, Default)]
pub struct MemoryScheduler {
    registry: Mutex<ScheduleRegistry>,
}

impl MemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_registry<T>(
        &self,
        f: impl FnOnce(&mut ScheduleRegistry) -> T,
    ) -> Result<T, ScheduleError> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| ScheduleError::LockPoisoned)?;
        Ok(f(&mut registry))
    }
}

impl SchedulingPort for MemoryScheduler {
    fn enqueue_unique_periodic(
        &self,
        request: &PeriodicRequest,
        policy: ExistingPolicy,
    ) -> Result<(), ScheduleError> {
        self.with_registry(|r| {
            r.enqueue(request, policy, Utc::now());
        })
    }

    fn cancel_unique(&self, name: &str) -> Result<usize, ScheduleError> {
        self.with_registry(|r| r.cancel(name))
    }

    fn registration(&self, name: &str) -> Result<Option<Registration>, ScheduleError> {
        self.with_registry(|r| r.get(name).cloned())
    }

    fn registration_count(&self, name: &str) -> Result<usize, ScheduleError> {
        self.with_registry(|r| r.count(name))
    }

    fn record_run(&self, name: &str, record: &RunRecord) -> Result<(), ScheduleError> {
        self.with_registry(|r| r.record_run(name, record))
    }
}
