//! Persistence port for account records.

use crate::accounts::errors::AccountError;
use crate::accounts::types::{Account, AccountId};

/// Storage backend the refresh coordinator reads accounts from and writes
/// refreshed capability fields back to.
///
/// Every update touches exactly one field of one account. Implementations
/// need not be transactional across fields.
pub trait AccountStore: Send + Sync {
    fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    fn update_cache_validation_token(
        &self,
        id: AccountId,
        token: &str,
    ) -> Result<(), AccountError>;

    fn update_brand_color(&self, id: AccountId, color: &str) -> Result<(), AccountError>;

    fn update_api_version(&self, id: AccountId, version: &str) -> Result<(), AccountError>;

    fn update_direct_editing_available(
        &self,
        id: AccountId,
        available: bool,
    ) -> Result<(), AccountError>;

    fn update_display_name(&self, id: AccountId, name: &str) -> Result<(), AccountError>;
}
