use std::sync::Arc;

use tracing::info;

use crate::accounts::Account;
use crate::capabilities::{CapabilitiesApi, CapabilitiesResponse};
use crate::refresh::classifier::{HTTP_NOT_MODIFIED, classify};
use crate::refresh::errors::RefreshError;
use crate::refresh::types::RefreshOutcome;
use crate::session::SessionResolver;

/// Fetches and classifies the capabilities of one account.
///
/// Never writes anything; applying the outcome is the coordinator's job.
#[derive(Clone)]
pub struct CapabilitiesFetcher {
    sessions: Arc<dyn SessionResolver>,
    api: Arc<dyn CapabilitiesApi>,
}

impl CapabilitiesFetcher {
    pub fn new(sessions: Arc<dyn SessionResolver>, api: Arc<dyn CapabilitiesApi>) -> Self {
        Self { sessions, api }
    }

    pub fn fetch(&self, account: &Account) -> RefreshOutcome {
        let session = match self.sessions.resolve_session(&account.account_name) {
            Ok(session) => session,
            Err(e) => return classify(e.into()),
        };

        info!(
            event = "core.refresh.fetch_started",
            account_id = %account.id,
            account_name = %account.account_name,
            has_etag = account.etag().is_some()
        );

        let outcome = match self.api.fetch_capabilities(&session, account.etag()) {
            Ok(CapabilitiesResponse::NotModified) => RefreshOutcome::Unchanged,
            // The display name is only worth a request when something changed.
            Ok(CapabilitiesResponse::Fresh(snapshot)) => {
                match self.api.fetch_display_name(&session) {
                    Ok(display_name) => RefreshOutcome::Updated {
                        snapshot,
                        display_name,
                    },
                    Err(e) => classify(e),
                }
            }
            Err(e) => classify(e),
        };

        // A server cannot confirm a token that was never sent.
        if account.etag().is_none() && matches!(outcome, RefreshOutcome::Unchanged) {
            return RefreshOutcome::Fatal(RefreshError::Protocol {
                status: HTTP_NOT_MODIFIED,
                message: "not modified without a validation token".to_string(),
            });
        }

        outcome
    }
}
