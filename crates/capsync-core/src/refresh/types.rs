use serde::{Deserialize, Serialize};
use std::fmt;

use crate::accounts::AccountId;
use crate::capabilities::CapabilitiesSnapshot;
use crate::errors::CapsyncError;
use crate::refresh::errors::RefreshError;

/// Result of refreshing one account during one tick.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The cached capabilities are still current.
    Unchanged,
    /// The server is in maintenance mode. Counted as success.
    ServerUnavailable,
    Updated {
        snapshot: CapabilitiesSnapshot,
        display_name: String,
    },
    Fatal(RefreshError),
}

impl RefreshOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RefreshOutcome::Fatal(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            RefreshOutcome::Unchanged => "unchanged",
            RefreshOutcome::ServerUnavailable => "server_unavailable",
            RefreshOutcome::Updated { .. } => "updated",
            RefreshOutcome::Fatal(_) => "fatal",
        }
    }
}

/// Aggregate status of one tick, handed to the external scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobResult {
    Success,
    Failure,
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobResult::Success => write!(f, "success"),
            JobResult::Failure => write!(f, "failure"),
        }
    }
}

/// A fatal outcome recorded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountFailure {
    pub account_id: AccountId,
    pub account_name: String,
    pub error_code: &'static str,
    pub message: String,
}

impl AccountFailure {
    pub fn new(account_id: AccountId, account_name: &str, error: &RefreshError) -> Self {
        Self {
            account_id,
            account_name: account_name.to_string(),
            error_code: error.error_code(),
            message: error.to_string(),
        }
    }
}

/// Per-tick counters. Only [`TickReport::result`] is part of the job
/// contract; the rest is diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub attempted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub unavailable: usize,
    pub failed: usize,
    /// Accounts not attempted because the tick was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
    /// Set when the account list itself could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_error: Option<String>,
    pub failures: Vec<AccountFailure>,
}

impl TickReport {
    pub fn record(&mut self, account_id: AccountId, account_name: &str, outcome: &RefreshOutcome) {
        self.attempted += 1;
        match outcome {
            RefreshOutcome::Unchanged => self.unchanged += 1,
            RefreshOutcome::ServerUnavailable => self.unavailable += 1,
            RefreshOutcome::Updated { .. } => self.updated += 1,
            RefreshOutcome::Fatal(error) => {
                self.failed += 1;
                self.failures
                    .push(AccountFailure::new(account_id, account_name, error));
            }
        }
    }

    /// `Failure` iff any account failed fatally, the account list could not
    /// be read, or the tick was cut short.
    pub fn result(&self) -> JobResult {
        if self.failed > 0 || self.cancelled || self.listing_error.is_some() {
            JobResult::Failure
        } else {
            JobResult::Success
        }
    }
}
