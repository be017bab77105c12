//! One tick of the capabilities refresh across all accounts.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::accounts::{Account, AccountError, AccountStore};
use crate::capabilities::CapabilitiesSnapshot;
use crate::refresh::cancel::CancelFlag;
use crate::refresh::classifier::classify_panic;
use crate::refresh::errors::RefreshError;
use crate::refresh::fetcher::CapabilitiesFetcher;
use crate::refresh::policy::{UnavailableStreaks, UnavailableTracker};
use crate::refresh::types::{JobResult, RefreshOutcome, TickReport};

/// Refreshes every account and folds the per-account outcomes into a
/// [`JobResult`].
///
/// Accounts are independent: a fatal outcome for one account is recorded
/// and the loop moves on to the next.
pub struct AccountRefreshCoordinator {
    store: Arc<dyn AccountStore>,
    fetcher: CapabilitiesFetcher,
    unavailable: UnavailableTracker,
}

impl AccountRefreshCoordinator {
    pub fn new(store: Arc<dyn AccountStore>, fetcher: CapabilitiesFetcher) -> Self {
        Self {
            store,
            fetcher,
            unavailable: UnavailableTracker::default(),
        }
    }

    /// Escalate `ServerUnavailable` to fatal after `limit` consecutive
    /// occurrences for the same account.
    pub fn with_unavailable_limit(mut self, limit: Option<u32>) -> Self {
        self.unavailable = UnavailableTracker::new(limit);
        self
    }

    /// Current unavailable streaks, to be saved for the next tick.
    pub fn unavailable_streaks(&self) -> UnavailableStreaks {
        self.unavailable.snapshot()
    }

    /// Continue the streaks saved by a previous tick.
    pub fn restore_unavailable_streaks(&self, streaks: UnavailableStreaks) {
        self.unavailable.restore(streaks);
    }

    /// Run one tick over every account in the store.
    pub fn run_tick(&self) -> JobResult {
        self.run_tick_cancellable(&CancelFlag::new()).result()
    }

    pub fn run_tick_cancellable(&self, cancel: &CancelFlag) -> TickReport {
        match self.store.list_accounts() {
            Ok(accounts) => {
                self.unavailable
                    .retain(|id| accounts.iter().any(|account| account.id == id));
                self.run_cancellable(&accounts, cancel)
            }
            Err(e) => {
                error!(event = "core.refresh.list_accounts_failed", error = %e);
                TickReport {
                    listing_error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    /// Refresh the given accounts.
    pub fn run(&self, accounts: &[Account]) -> JobResult {
        self.run_cancellable(accounts, &CancelFlag::new()).result()
    }

    pub fn run_cancellable(&self, accounts: &[Account], cancel: &CancelFlag) -> TickReport {
        info!(event = "core.refresh.tick_started", accounts = accounts.len());

        let mut report = TickReport::default();

        for (index, account) in accounts.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                report.skipped = accounts.len() - index;
                warn!(
                    event = "core.refresh.tick_cancelled",
                    completed = index,
                    skipped = report.skipped
                );
                break;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| self.refresh_account(account)))
                .unwrap_or_else(classify_panic);

            log_outcome(account, &outcome);
            report.record(account.id, &account.account_name, &outcome);
        }

        let result = report.result();
        info!(
            event = "core.refresh.tick_completed",
            result = %result,
            attempted = report.attempted,
            updated = report.updated,
            unchanged = report.unchanged,
            unavailable = report.unavailable,
            failed = report.failed,
            cancelled = report.cancelled
        );

        report
    }

    fn refresh_account(&self, account: &Account) -> RefreshOutcome {
        let outcome = self.fetcher.fetch(account);
        let outcome = self.unavailable.apply(account.id, outcome);

        match outcome {
            RefreshOutcome::Updated {
                snapshot,
                display_name,
            } => match self.write_back(account, &snapshot, &display_name) {
                Ok(()) => RefreshOutcome::Updated {
                    snapshot,
                    display_name,
                },
                Err(e) => RefreshOutcome::Fatal(e),
            },
            other => other,
        }
    }

    /// Persist a fresh snapshot field by field.
    ///
    /// The validation token goes last: if an earlier write fails the old
    /// token stays, so the next tick fetches everything again instead of
    /// being told "not modified".
    fn write_back(
        &self,
        account: &Account,
        snapshot: &CapabilitiesSnapshot,
        display_name: &str,
    ) -> Result<(), RefreshError> {
        let id = account.id;
        let write = |field: &'static str, result: Result<(), AccountError>| {
            result.map_err(|source| RefreshError::PersistenceWrite { field, source })
        };

        write(
            "brand_color",
            self.store.update_brand_color(id, snapshot.brand_color()),
        )?;
        write(
            "api_version",
            self.store.update_api_version(id, snapshot.api_version()),
        )?;
        write(
            "direct_editing_available",
            self.store
                .update_direct_editing_available(id, snapshot.direct_editing_available()),
        )?;
        write(
            "display_name",
            self.store.update_display_name(id, display_name),
        )?;
        write(
            "cache_validation_token",
            self.store
                .update_cache_validation_token(id, snapshot.validation_token()),
        )?;

        Ok(())
    }
}

fn log_outcome(account: &Account, outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Unchanged => info!(
            event = "core.refresh.account_unchanged",
            account_id = %account.id,
            account_name = %account.account_name
        ),
        RefreshOutcome::ServerUnavailable => info!(
            event = "core.refresh.account_server_unavailable",
            account_id = %account.id,
            account_name = %account.account_name,
            "Server is in maintenance mode"
        ),
        RefreshOutcome::Updated {
            snapshot,
            display_name,
        } => info!(
            event = "core.refresh.account_updated",
            account_id = %account.id,
            account_name = %account.account_name,
            api_version = snapshot.api_version(),
            brand_color = snapshot.brand_color(),
            direct_editing_available = snapshot.direct_editing_available(),
            display_name = %display_name
        ),
        RefreshOutcome::Fatal(e) => error!(
            event = "core.refresh.account_failed",
            account_id = %account.id,
            account_name = %account.account_name,
            error = %e,
            error_code = crate::errors::CapsyncError::error_code(e)
        ),
    }
}
