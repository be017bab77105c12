use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::ScheduleConfig;
use crate::refresh::{JobResult, UnavailableStreaks};

/// Preconditions the scheduler must meet before starting a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub require_network: bool,
}

/// A periodic trigger, registered under a unique logical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicRequest {
    pub name: String,
    pub interval_secs: u64,
    pub constraints: Constraints,
}

impl PeriodicRequest {
    pub fn new(name: impl Into<String>, interval: Duration, constraints: Constraints) -> Self {
        Self {
            name: name.into(),
            interval_secs: interval.as_secs(),
            constraints,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl From<&ScheduleConfig> for PeriodicRequest {
    fn from(config: &ScheduleConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.interval(),
            Constraints {
                require_network: config.require_network,
            },
        )
    }
}

/// What to do when a trigger with the same name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingPolicy {
    /// Drop the existing trigger and register the new one.
    Replace,
    /// Leave the existing trigger in place.
    Keep,
}

/// A registered trigger and its run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub request: PeriodicRequest,
    pub registered_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<JobResult>,
    /// Carried from one tick into the next so escalation works across
    /// separate processes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unavailable_streaks: UnavailableStreaks,
}

impl Registration {
    pub fn new(request: PeriodicRequest, registered_at: DateTime<Utc>) -> Self {
        Self {
            request,
            registered_at,
            last_run: None,
            last_result: None,
            unavailable_streaks: UnavailableStreaks::new(),
        }
    }

    /// Whether a full interval has passed since the last run.
    ///
    /// An interval too large to represent is never due again.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_run {
            None => true,
            Some(_) => self.next_run().is_some_and(|next_run| now >= next_run),
        }
    }

    /// `None` before the first run, or when the interval does not fit a
    /// timestamp.
    pub fn next_run(&self) -> Option<DateTime<Utc>> {
        let interval = i64::try_from(self.request.interval_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)?;
        self.last_run?.checked_add_signed(interval)
    }

    pub fn record(&mut self, record: &RunRecord) {
        self.last_run = Some(record.at);
        self.last_result = Some(record.result);
        self.unavailable_streaks = record.unavailable_streaks.clone();
    }
}

/// What the scheduler remembers about one finished tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub at: DateTime<Utc>,
    pub result: JobResult,
    pub unavailable_streaks: UnavailableStreaks,
}

impl RunRecord {
    pub fn new(at: DateTime<Utc>, result: JobResult) -> Self {
        Self {
            at,
            result,
            unavailable_streaks: UnavailableStreaks::new(),
        }
    }

    pub fn with_unavailable_streaks(mut self, streaks: UnavailableStreaks) -> Self {
        self.unavailable_streaks = streaks;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleState {
    Unregistered,
    Registered,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountId;

    fn request() -> PeriodicRequest {
        PeriodicRequest::new(
            "capabilities",
            Duration::from_secs(24 * 60 * 60),
            Constraints {
                require_network: true,
            },
        )
    }

    #[test]
    fn test_request_from_default_config() {
        let request = PeriodicRequest::from(&ScheduleConfig::default());
        assert_eq!(request, self::request());
        assert_eq!(request.interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_never_run_is_due() {
        let registration = Registration::new(request(), Utc::now());
        assert!(registration.is_due(Utc::now()));
        assert!(registration.next_run().is_none());
    }

    #[test]
    fn test_due_after_interval() {
        let now = Utc::now();
        let mut registration = Registration::new(request(), now);
        registration.last_run = Some(now - chrono::Duration::hours(23));
        assert!(!registration.is_due(now));

        registration.last_run = Some(now - chrono::Duration::hours(24));
        assert!(registration.is_due(now));
        assert_eq!(registration.next_run(), Some(now));
    }

    #[test]
    fn test_unrepresentable_interval_does_not_panic() {
        let now = Utc::now();
        let request = PeriodicRequest {
            interval_secs: 1_000_000_000_000 * 3600,
            ..request()
        };
        let mut registration = Registration::new(request, now);
        assert!(registration.is_due(now));

        registration.last_run = Some(now);
        assert_eq!(registration.next_run(), None);
        assert!(!registration.is_due(now));

        registration.request.interval_secs = u64::MAX;
        assert_eq!(registration.next_run(), None);
        assert!(!registration.is_due(now));
    }

    #[test]
    fn test_record_replaces_streaks() {
        let now = Utc::now();
        let mut registration = Registration::new(request(), now);
        registration.unavailable_streaks.insert(AccountId(1), 2);

        let streaks = UnavailableStreaks::from([(AccountId(2), 1)]);
        registration
            .record(&RunRecord::new(now, JobResult::Success).with_unavailable_streaks(streaks));

        assert_eq!(registration.last_run, Some(now));
        assert_eq!(registration.last_result, Some(JobResult::Success));
        assert_eq!(
            registration.unavailable_streaks,
            UnavailableStreaks::from([(AccountId(2), 1)])
        );
    }

    #[test]
    fn test_streaks_survive_json() {
        let mut registration = Registration::new(request(), Utc::now());
        registration.unavailable_streaks.insert(AccountId(7), 3);

        let json = serde_json::to_string(&registration).unwrap();
        let parsed: Registration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.unavailable_streaks.get(&AccountId(7)), Some(&3));
    }
}
