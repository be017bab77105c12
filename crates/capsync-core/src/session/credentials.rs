//! Session resolution from a TOML credentials file.
//!
//! ```toml
//! [accounts."alice@cloud.example.com"]
//! server_url = "https://cloud.example.com"
//! user = "alice"
//! app_password = "xxxxx-xxxxx-xxxxx-xxxxx-xxxxx"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::errors::SessionError;
use crate::session::traits::SessionResolver;
use crate::session::types::SessionHandle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub accounts: BTreeMap<String, CredentialEntry>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub server_url: String,
    pub user: String,
    pub app_password: String,
}

impl std::fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("server_url", &self.server_url)
            .field("user", &self.user)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

impl CredentialsFile {
    /// Load the credentials file. A missing file has no entries.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SessionError::CredentialsCorrupted {
            message: format!("{} ({})", e, path.display()),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SessionError::CredentialsCorrupted {
                message: format!("Failed to serialize credentials: {}", e),
            }
        })?;

        let temp_file = path.with_extension("toml.tmp");
        fs::write(&temp_file, content)?;
        if let Err(e) = fs::rename(&temp_file, path) {
            let _ = fs::remove_file(&temp_file);
            return Err(e.into());
        }
        Ok(())
    }
}

/// [`SessionResolver`] backed by a [`CredentialsFile`] on disk.
///
/// The file is re-read on every resolution so that credentials edited
/// between ticks are picked up.
#[derive(Debug, Clone)]
pub struct CredentialsFileResolver {
    path: PathBuf,
}

impl CredentialsFileResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionResolver for CredentialsFileResolver {
    fn resolve_session(&self, account_name: &str) -> Result<SessionHandle, SessionError> {
        let file = CredentialsFile::load(&self.path)?;

        let not_found = |reason: &str| SessionError::NotFound {
            account_name: account_name.to_string(),
            reason: reason.to_string(),
        };

        let entry = file
            .accounts
            .get(account_name)
            .ok_or_else(|| not_found("no credentials stored"))?;

        if entry.server_url.trim().is_empty() {
            return Err(not_found("server_url is empty"));
        }
        if entry.user.trim().is_empty() {
            return Err(not_found("user is empty"));
        }
        if entry.app_password.is_empty() {
            return Err(not_found("app_password is empty"));
        }

        Ok(SessionHandle::new(
            account_name,
            entry.server_url.trim(),
            entry.user.trim(),
            entry.app_password.clone(),
        ))
    }
}
