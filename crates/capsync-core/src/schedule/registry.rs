//! Registration bookkeeping shared by the scheduler implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::types::{ExistingPolicy, PeriodicRequest, Registration, RunRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRegistry {
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

impl ScheduleRegistry {
    /// Returns whether a registration was added.
    pub fn enqueue(
        &mut self,
        request: &PeriodicRequest,
        policy: ExistingPolicy,
        now: DateTime<Utc>,
    ) -> bool {
        let exists = self.count(&request.name) > 0;
        match policy {
            ExistingPolicy::Keep if exists => return false,
            ExistingPolicy::Keep => {}
            ExistingPolicy::Replace => {
                self.cancel(&request.name);
            }
        }

        self.registrations
            .push(Registration::new(request.clone(), now));
        true
    }

    pub fn cancel(&mut self, name: &str) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.request.name != name);
        before - self.registrations.len()
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.request.name == name)
    }

    pub fn count(&self, name: &str) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.request.name == name)
            .count()
    }

    pub fn record_run(&mut self, name: &str, record: &RunRecord) {
        for registration in self
            .registrations
            .iter_mut()
            .filter(|r| r.request.name == name)
        {
            registration.record(record);
        }
    }
}
