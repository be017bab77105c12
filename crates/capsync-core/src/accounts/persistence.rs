//! Accounts file persistence
//!
//! Accounts live in a single JSON file. Every field update is a
//! load-modify-save cycle ending in an atomic temp-file rename.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::accounts::errors::AccountError;
use crate::accounts::traits::AccountStore;
use crate::accounts::types::{Account, AccountId, AccountsData};

/// File-backed [`AccountStore`].
#[derive(Debug)]
pub struct JsonAccountStore {
    path: PathBuf,
    // Serializes load-modify-save cycles within this process.
    write_lock: Mutex<()>,
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.accounts.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            "Failed to clean up temp file after write error"
        );
    }
}

impl JsonAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all accounts. A missing file is an empty account list.
    pub fn load(&self) -> Result<AccountsData, AccountError> {
        if !self.path.exists() {
            return Ok(AccountsData::default());
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            tracing::error!(
                event = "core.accounts.json_parse_failed",
                path = %self.path.display(),
                error = %e,
                "Accounts file exists but contains invalid JSON"
            );
            AccountError::LoadCorrupted {
                message: format!("{} ({})", e, self.path.display()),
            }
        })
    }

    fn save(&self, data: &AccountsData) -> Result<(), AccountError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AccountError::SaveFailed {
                message: format!("Failed to create directory ({}): {}", parent.display(), e),
            })?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| AccountError::SaveFailed {
            message: format!("Failed to serialize accounts: {}", e),
        })?;

        let temp_file = self.path.with_extension("json.tmp");

        if let Err(e) = fs::write(&temp_file, &json) {
            cleanup_temp_file(&temp_file, &e);
            return Err(AccountError::SaveFailed {
                message: format!("Failed to write {}: {}", temp_file.display(), e),
            });
        }

        if let Err(e) = fs::rename(&temp_file, &self.path) {
            cleanup_temp_file(&temp_file, &e);
            return Err(AccountError::SaveFailed {
                message: format!("Failed to replace {}: {}", self.path.display(), e),
            });
        }

        Ok(())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut AccountsData) -> Result<T, AccountError>,
    ) -> Result<T, AccountError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AccountError::LockPoisoned)?;

        let mut data = self.load()?;
        let value = f(&mut data)?;
        self.save(&data)?;
        Ok(value)
    }

    fn update_account(
        &self,
        id: AccountId,
        f: impl FnOnce(&mut Account),
    ) -> Result<(), AccountError> {
        self.modify(|data| {
            let account = data.find_mut(id).ok_or(AccountError::NotFound { id })?;
            f(account);
            Ok(())
        })
    }

    pub fn get_account(&self, id: AccountId) -> Result<Account, AccountError> {
        self.load()?
            .accounts
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(AccountError::NotFound { id })
    }

    pub fn find_by_name(&self, account_name: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .load()?
            .accounts
            .into_iter()
            .find(|a| a.account_name == account_name))
    }

    /// Register a new account with empty cached capabilities.
    pub fn add_account(&self, account_name: &str) -> Result<Account, AccountError> {
        let account_name = account_name.trim();
        if account_name.is_empty() {
            return Err(AccountError::InvalidName);
        }

        let account = self.modify(|data| {
            if data.accounts.iter().any(|a| a.account_name == account_name) {
                return Err(AccountError::AlreadyExists {
                    name: account_name.to_string(),
                });
            }
            let account = Account::new(data.next_id(), account_name);
            data.accounts.push(account.clone());
            Ok(account)
        })?;

        tracing::info!(
            event = "core.accounts.added",
            account_id = %account.id,
            account_name = %account.account_name
        );

        Ok(account)
    }

    pub fn remove_account(&self, id: AccountId) -> Result<Account, AccountError> {
        let removed = self.modify(|data| {
            let index = data
                .accounts
                .iter()
                .position(|a| a.id == id)
                .ok_or(AccountError::NotFound { id })?;
            Ok(data.accounts.remove(index))
        })?;

        tracing::info!(
            event = "core.accounts.removed",
            account_id = %removed.id,
            account_name = %removed.account_name
        );

        Ok(removed)
    }
}

impl AccountStore for JsonAccountStore {
    fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.load()?.accounts)
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
