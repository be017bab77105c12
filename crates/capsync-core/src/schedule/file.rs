//! Schedule registry persisted as JSON.
//!
//! Used when an OS timer (cron, systemd timer, launchd) is the actual
//! scheduler: `enable`/`disable` edit the registry, and each timer firing
//! consults it to decide whether a tick is due.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::schedule::errors::ScheduleError;
use crate::schedule::registry::ScheduleRegistry;
use crate::schedule::traits::SchedulingPort;
use crate::schedule::types::{ExistingPolicy, PeriodicRequest, Registration, RunRecord};

#[derive(Debug)]
pub struct FileScheduler {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileScheduler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ScheduleRegistry, ScheduleError> {
        if !self.path.exists() {
            return Ok(ScheduleRegistry::default());
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            tracing::error!(
                event = "core.schedule.registry_parse_failed",
                path = %self.path.display(),
                error = %e
            );
            ScheduleError::RegistryCorrupted {
                message: format!("{} ({})", e, self.path.display()),
            }
        })
    }

    fn save(&self, registry: &ScheduleRegistry) -> Result<(), ScheduleError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json =
            serde_json::to_string_pretty(registry).map_err(|e| ScheduleError::SaveFailed {
                message: format!("Failed to serialize schedule registry: {}", e),
            })?;

        let temp_file = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&temp_file, &json).and_then(|_| fs::rename(&temp_file, &self.path))
        {
            if let Err(cleanup_err) = fs::remove_file(&temp_file) {
                tracing::warn!(
                    event = "core.schedule.temp_file_cleanup_failed",
                    temp_file = %temp_file.display(),
                    original_error = %e,
                    cleanup_error = %cleanup_err
                );
            }
            return Err(ScheduleError::SaveFailed {
                message: format!("{} ({})", e, self.path.display()),
            });
        }

        Ok(())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut ScheduleRegistry) -> T,
    ) -> Result<T, ScheduleError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ScheduleError::LockPoisoned)?;

        let mut registry = self.load()?;
        let value = f(&mut registry);
        self.save(&registry)?;
        Ok(value)
    }
}

impl SchedulingPort for FileScheduler {
    fn enqueue_unique_periodic(
        &self,
        request: &PeriodicRequest,
        policy: ExistingPolicy,
    ) -> Result<(), ScheduleError> {
        self.modify(|r| {
            r.enqueue(request, policy, Utc::now());
        })
    }

    fn cancel_unique(&self, name: &str) -> Result<usize, ScheduleError> {
        // Avoid creating the file just to cancel nothing.
        if !self.path.exists() {
            return Ok(0);
        }
        self.modify(|r| r.cancel(name))
    }

    fn registration(&self, name: &str) -> Result<Option<Registration>, ScheduleError> {
        Ok(self.load()?.get(name).cloned())
    }

    fn registration_count(&self, name: &str) -> Result<usize, ScheduleError> {
        Ok(self.load()?.count(name))
    }

    fn record_run(&self, name: &str, record: &RunRecord) -> Result<(), ScheduleError> {
        self.modify(|r| r.record_run(name, record))
    }
}
