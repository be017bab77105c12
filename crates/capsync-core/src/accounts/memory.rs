use std::sync::Mutex;

use crate::accounts::errors::AccountError;
use crate::accounts::traits::AccountStore;
use crate::accounts::types::{Account, AccountId};

/// In-process [`AccountStore`] for embedding capsync in a host application
/// that keeps accounts elsewhere, and for tests.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    pub fn get(&self, id: AccountId) -> Option<Account> {
        self.accounts
            .lock()
            .ok()
            .and_then(|accounts| accounts.iter().find(|a| a.id == id).cloned())
    }

    fn update_account(
        &self,
        id: AccountId,
        f: impl FnOnce(&mut Account),
    ) -> Result<(), AccountError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| AccountError::LockPoisoned)?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AccountError::NotFound { id })?;
        f(account);
        Ok(())
    }
}

impl AccountStore for MemoryAccountStore {
    fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.accounts
            .lock()
            .map(|accounts| accounts.clone())
            .map_err(|_| AccountError::LockPoisoned)
    }

    fn update_cache_validation_token(
        &self,
        id: AccountId,
        token: &str,
    ) -> Result<(), AccountError> {
        self.update_account(id, |a| a.cache_validation_token = token.to_string())
    }

    fn update_brand_color(&self, id: AccountId, color: &str) -> Result<(), AccountError> {
        self.update_account(id, |a| a.brand_color = color.to_string())
    }

    fn update_api_version(&self, id: AccountId, version: &str) -> Result<(), AccountError> {
        self.update_account(id, |a| a.api_version = version.to_string())
    }

    fn update_direct_editing_available(
        &self,
        id: AccountId,
        available: bool,
    ) -> Result<(), AccountError> {
        self.update_account(id, |a| a.direct_editing_available = available)
    }

    fn update_display_name(&self, id: AccountId, name: &str) -> Result<(), AccountError> {
        self.update_account(id, |a| a.display_name = name.to_string())
    }
}
