use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a configured account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A remote account together with its cached server capabilities.
///
/// The five cached fields only ever change as a group derived from one
/// successful capabilities fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    /// Name used to look up the account's session, e.g. `alice@cloud.example.com`.
    pub account_name: String,

    /// Last seen ETag of the capabilities endpoint. Empty until the first fetch.
    #[serde(default)]
    pub cache_validation_token: String,

    #[serde(default)]
    pub brand_color: String,

    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub direct_editing_available: bool,

    #[serde(default)]
    pub display_name: String,
}

impl Account {
    pub fn new(id: AccountId, account_name: impl Into<String>) -> Self {
        Self {
            id,
            account_name: account_name.into(),
            cache_validation_token: String::new(),
            brand_color: String::new(),
            api_version: String::new(),
            direct_editing_available: false,
            display_name: String::new(),
        }
    }

    /// The validation token to send with a conditional request, if any.
    pub fn etag(&self) -> Option<&str> {
        if self.cache_validation_token.is_empty() {
            None
        } else {
            Some(&self.cache_validation_token)
        }
    }
}

/// On-disk representation of the accounts file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountsData {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl AccountsData {
    pub fn find_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    pub fn next_id(&self) -> AccountId {
        AccountId(self.accounts.iter().map(|a| a.id.0).max().unwrap_or(0) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_has_no_etag() {
        let account = Account::new(AccountId(1), "alice@cloud.example.com");
        assert_eq!(account.etag(), None);
        assert!(account.brand_color.is_empty());
        assert!(!account.direct_editing_available);
    }

    #[test]
    fn test_etag_present() {
        let mut account = Account::new(AccountId(1), "alice@cloud.example.com");
        account.cache_validation_token = "abc123".to_string();
        assert_eq!(account.etag(), Some("abc123"));
    }

    #[test]
    fn test_account_deserialize_missing_cached_fields() {
        let json = r#"{"id": 7, "account_name": "bob@example.org"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account, Account::new(AccountId(7), "bob@example.org"));
    }

    #[test]
    fn test_next_id() {
        let mut data = AccountsData::default();
        assert_eq!(data.next_id(), AccountId(1));

        data.accounts.push(Account::new(AccountId(4), "a"));
        data.accounts.push(Account::new(AccountId(2), "b"));
        assert_eq!(data.next_id(), AccountId(5));
    }
}
