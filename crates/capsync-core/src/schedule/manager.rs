//! Lifecycle of the periodic capabilities trigger.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::ScheduleConfig;
use crate::refresh::{AccountRefreshCoordinator, CancelFlag, TickReport};
use crate::schedule::errors::ScheduleError;
use crate::schedule::traits::SchedulingPort;
use crate::schedule::types::{
    ExistingPolicy, PeriodicRequest, Registration, RunRecord, ScheduleState,
};

/// Registers and deregisters the periodic trigger under its logical name.
///
/// `enable` always deregisters first, so repeated calls leave exactly one
/// registration behind whatever the scheduler's own policy handling does.
pub struct ScheduleManager {
    port: Arc<dyn SchedulingPort>,
    request: PeriodicRequest,
}

impl ScheduleManager {
    pub fn new(port: Arc<dyn SchedulingPort>, request: PeriodicRequest) -> Self {
        Self { port, request }
    }

    pub fn from_config(port: Arc<dyn SchedulingPort>, config: &ScheduleConfig) -> Self {
        Self::new(port, PeriodicRequest::from(config))
    }

    pub fn request(&self) -> &PeriodicRequest {
        &self.request
    }

    pub fn enable(&self) -> Result<(), ScheduleError> {
        info!(
            event = "core.schedule.enable_started",
            name = %self.request.name,
            interval_secs = self.request.interval_secs,
            require_network = self.request.constraints.require_network
        );

        self.disable()?;
        self.port
            .enqueue_unique_periodic(&self.request, ExistingPolicy::Replace)?;

        info!(event = "core.schedule.enable_completed", name = %self.request.name);
        Ok(())
    }

    /// Remove the trigger. Nothing registered is not an error.
    pub fn disable(&self) -> Result<(), ScheduleError> {
        let removed = self.port.cancel_unique(&self.request.name)?;
        info!(
            event = "core.schedule.disable_completed",
            name = %self.request.name,
            removed = removed
        );
        Ok(())
    }

    pub fn state(&self) -> Result<ScheduleState, ScheduleError> {
        Ok(if self.port.registration_count(&self.request.name)? > 0 {
            ScheduleState::Registered
        } else {
            ScheduleState::Unregistered
        })
    }

    pub fn is_enabled(&self) -> Result<bool, ScheduleError> {
        Ok(self.state()? == ScheduleState::Registered)
    }

    pub fn status(&self) -> Result<Option<Registration>, ScheduleError> {
        self.port.registration(&self.request.name)
    }

    pub fn is_due(&self) -> Result<bool, ScheduleError> {
        self.port.is_due(&self.request.name, Utc::now())
    }

    /// Run one tick and record its result against the registration.
    ///
    /// Unavailable streaks saved by the previous tick are handed to the
    /// coordinator first and the updated ones saved with the result.
    /// Failing to record the run is logged; the tick itself already happened.
    pub fn run_tick(
        &self,
        coordinator: &AccountRefreshCoordinator,
        cancel: &CancelFlag,
    ) -> TickReport {
        info!(event = "core.schedule.tick_started", name = %self.request.name);

        match self.port.registration(&self.request.name) {
            Ok(Some(registration)) => {
                coordinator.restore_unavailable_streaks(registration.unavailable_streaks)
            }
            Ok(None) => {}
            Err(e) => warn!(
                event = "core.schedule.streaks_load_failed",
                name = %self.request.name,
                error = %e
            ),
        }

        let report = coordinator.run_tick_cancellable(cancel);
        let result = report.result();

        let record = RunRecord::new(Utc::now(), result)
            .with_unavailable_streaks(coordinator.unavailable_streaks());
        if let Err(e) = self.port.record_run(&self.request.name, &record) {
            warn!(
                event = "core.schedule.record_run_failed",
                name = %self.request.name,
                error = %e
            );
        }

        info!(
            event = "core.schedule.tick_completed",
            name = %self.request.name,
            result = %result
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{Account, AccountId, MemoryAccountStore};
    use crate::capabilities::CapabilitiesSnapshot;
    use crate::refresh::fetcher::test_support::{Script, ScriptedApi, StaticSessions};
    use crate::refresh::{CapabilitiesFetcher, JobResult};
    use crate::schedule::file::FileScheduler;
    use crate::schedule::memory::MemoryScheduler;

    fn manager() -> (Arc<MemoryScheduler>, ScheduleManager) {
        let port = Arc::new(MemoryScheduler::new());
        let manager = ScheduleManager::from_config(port.clone(), &ScheduleConfig::default());
        (port, manager)
    }

    #[test]
    fn test_enable_twice_leaves_one_registration() {
        let (port, manager) = manager();

        manager.enable().unwrap();
        manager.enable().unwrap();

        assert_eq!(port.registration_count("capabilities").unwrap(), 1);
        assert_eq!(manager.state().unwrap(), ScheduleState::Registered);
    }

    #[test]
    fn test_enable_registers_daily_network_trigger() {
        let (_, manager) = manager();
        manager.enable().unwrap();

        let registration = manager.status().unwrap().unwrap();
        assert_eq!(registration.request.interval_secs, 24 * 60 * 60);
        assert!(registration.request.constraints.require_network);
    }

    #[test]
    fn test_disable_when_unregistered_is_noop() {
        let (_, manager) = manager();

        manager.disable().unwrap();

        assert_eq!(manager.state().unwrap(), ScheduleState::Unregistered);
        assert!(!manager.is_enabled().unwrap());
    }

    #[test]
    fn test_enable_then_disable() {
        let (port, manager) = manager();

        manager.enable().unwrap();
        manager.disable().unwrap();

        assert_eq!(port.registration_count("capabilities").unwrap(), 0);
        assert!(manager.status().unwrap().is_none());
    }

    #[test]
    fn test_run_tick_records_result() {
        let (_, manager) = manager();
        manager.enable().unwrap();
        assert!(manager.is_due().unwrap());

        let store = Arc::new(MemoryAccountStore::new(vec![Account::new(
            AccountId(1),
            "alice@cloud.example",
        )]));
        let api = Arc::new(ScriptedApi::default().with(
            "alice@cloud.example",
            Script::Fresh(
                CapabilitiesSnapshot::new("\"etag\"", "#0082c9", "1.3", true),
                "Alice".to_string(),
            ),
        ));
        let fetcher = CapabilitiesFetcher::new(Arc::new(StaticSessions::default()), api);
        let coordinator = AccountRefreshCoordinator::new(store, fetcher);

        let report = manager.run_tick(&coordinator, &CancelFlag::new());

        assert_eq!(report.result(), JobResult::Success);
        let registration = manager.status().unwrap().unwrap();
        assert_eq!(registration.last_result, Some(JobResult::Success));
        assert!(!manager.is_due().unwrap());
    }

    /// Each tick runs in a fresh process with a fresh coordinator; the
    /// streak has to come from the registry file.
    #[test]
    fn test_unavailable_escalates_across_separate_ticks() {
        let dir = tempfile::TempDir::new().unwrap();
        let schedules = dir.path().join("schedules.json");
        let store = Arc::new(MemoryAccountStore::new(vec![Account::new(
            AccountId(1),
            "bob@cloud.example",
        )]));
        let api = Arc::new(ScriptedApi::default().with("bob@cloud.example", Script::Status(503)));

        let tick = || {
            let manager = ScheduleManager::from_config(
                Arc::new(FileScheduler::new(&schedules)),
                &ScheduleConfig::default(),
            );
            let fetcher =
                CapabilitiesFetcher::new(Arc::new(StaticSessions::default()), api.clone());
            let coordinator = AccountRefreshCoordinator::new(store.clone(), fetcher)
                .with_unavailable_limit(Some(3));
            manager.run_tick(&coordinator, &CancelFlag::new())
        };

        ScheduleManager::from_config(
            Arc::new(FileScheduler::new(&schedules)),
            &ScheduleConfig::default(),
        )
        .enable()
        .unwrap();

        assert_eq!(tick().result(), JobResult::Success);
        assert_eq!(tick().result(), JobResult::Success);
        let third = tick();
        assert_eq!(third.result(), JobResult::Failure);
        assert_eq!(third.failures[0].error_code, "REFRESH_UNAVAILABLE_ESCALATED");

        let registration = FileScheduler::new(&schedules)
            .registration("capabilities")
            .unwrap()
            .unwrap();
        assert_eq!(registration.unavailable_streaks.get(&AccountId(1)), Some(&3));
    }

    #[test]
    fn test_reenable_clears_streaks() {
        let (port, manager) = manager();
        manager.enable().unwrap();
        port.record_run(
            "capabilities",
            &RunRecord::new(Utc::now(), JobResult::Success)
                .with_unavailable_streaks([(AccountId(1), 2)].into()),
        )
        .unwrap();

        manager.enable().unwrap();

        assert!(manager.status().unwrap().unwrap().unavailable_streaks.is_empty());
    }
}
