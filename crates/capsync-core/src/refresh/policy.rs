//! Escalation of repeated maintenance-mode answers.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::accounts::AccountId;
use crate::refresh::errors::RefreshError;
use crate::refresh::types::RefreshOutcome;

/// Consecutive "service unavailable" answers per account.
pub type UnavailableStreaks = BTreeMap<AccountId, u32>;

/// Counts consecutive `ServerUnavailable` outcomes per account across ticks
/// and turns the outcome fatal once the configured limit is reached.
///
/// With no limit every outcome passes through unchanged.
#[derive(Debug, Default)]
pub struct UnavailableTracker {
    limit: Option<u32>,
    streaks: Mutex<UnavailableStreaks>,
}

impl UnavailableTracker {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            limit,
            streaks: Mutex::new(UnavailableStreaks::new()),
        }
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn streak(&self, id: AccountId) -> u32 {
        self.streaks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> UnavailableStreaks {
        self.streaks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current streaks, e.g. with the ones saved by the previous
    /// tick.
    pub fn restore(&self, streaks: UnavailableStreaks) {
        *self.streaks.lock().unwrap_or_else(PoisonError::into_inner) = streaks;
    }

    /// Forget accounts that no longer exist.
    pub fn retain(&self, keep: impl Fn(AccountId) -> bool) {
        self.streaks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|id, _| keep(*id));
    }

    pub fn apply(&self, id: AccountId, outcome: RefreshOutcome) -> RefreshOutcome {
        let mut streaks = self.streaks.lock().unwrap_or_else(PoisonError::into_inner);

        if !matches!(outcome, RefreshOutcome::ServerUnavailable) {
            streaks.remove(&id);
            return outcome;
        }

        let count = streaks.entry(id).or_insert(0);
        *count += 1;

        match self.limit {
            Some(limit) if *count >= limit => {
                warn!(
                    event = "core.refresh.unavailable_escalated",
                    account_id = %id,
                    count = *count,
                    limit = limit
                );
                RefreshOutcome::Fatal(RefreshError::UnavailableEscalated { count: *count })
            }
            _ => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_limit_never_escalates() {
        let tracker = UnavailableTracker::new(None);
        for _ in 0..100 {
            let outcome = tracker.apply(AccountId(1), RefreshOutcome::ServerUnavailable);
            assert!(matches!(outcome, RefreshOutcome::ServerUnavailable));
        }
        assert_eq!(tracker.streak(AccountId(1)), 100);
    }

    #[test]
    fn test_escalates_at_limit() {
        let tracker = UnavailableTracker::new(Some(3));
        let id = AccountId(1);

        assert!(!tracker.apply(id, RefreshOutcome::ServerUnavailable).is_fatal());
        assert!(!tracker.apply(id, RefreshOutcome::ServerUnavailable).is_fatal());
        let third = tracker.apply(id, RefreshOutcome::ServerUnavailable);
        assert!(matches!(
            third,
            RefreshOutcome::Fatal(RefreshError::UnavailableEscalated { count: 3 })
        ));
    }

    #[test]
    fn test_other_outcome_resets_streak() {
        let tracker = UnavailableTracker::new(Some(2));
        let id = AccountId(7);

        tracker.apply(id, RefreshOutcome::ServerUnavailable);
        tracker.apply(id, RefreshOutcome::Unchanged);
        assert_eq!(tracker.streak(id), 0);

        assert!(!tracker.apply(id, RefreshOutcome::ServerUnavailable).is_fatal());
    }

    #[test]
    fn test_unchanged_never_escalates() {
        let tracker = UnavailableTracker::new(Some(1));
        for _ in 0..5 {
            assert!(matches!(
                tracker.apply(AccountId(1), RefreshOutcome::Unchanged),
                RefreshOutcome::Unchanged
            ));
        }
    }

    #[test]
    fn test_restored_streak_counts_towards_limit() {
        let first = UnavailableTracker::new(Some(3));
        first.apply(AccountId(1), RefreshOutcome::ServerUnavailable);
        first.apply(AccountId(1), RefreshOutcome::ServerUnavailable);

        let second = UnavailableTracker::new(Some(3));
        second.restore(first.snapshot());

        assert_eq!(second.streak(AccountId(1)), 2);
        assert!(matches!(
            second.apply(AccountId(1), RefreshOutcome::ServerUnavailable),
            RefreshOutcome::Fatal(RefreshError::UnavailableEscalated { count: 3 })
        ));
    }

    #[test]
    fn test_retain_drops_unknown_accounts() {
        let tracker = UnavailableTracker::new(None);
        tracker.apply(AccountId(1), RefreshOutcome::ServerUnavailable);
        tracker.apply(AccountId(2), RefreshOutcome::ServerUnavailable);

        tracker.retain(|id| id == AccountId(2));

        assert_eq!(tracker.snapshot(), UnavailableStreaks::from([(AccountId(2), 1)]));
    }

    #[test]
    fn test_streaks_are_per_account() {
        let tracker = UnavailableTracker::new(Some(2));
        tracker.apply(AccountId(1), RefreshOutcome::ServerUnavailable);
        let other = tracker.apply(AccountId(2), RefreshOutcome::ServerUnavailable);
        assert!(!other.is_fatal());
    }
}
