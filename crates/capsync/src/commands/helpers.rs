use std::sync::Arc;

use tracing::warn;

use capsync_core::schedule::{FileScheduler, ScheduleManager};
use capsync_core::{
    AccountRefreshCoordinator, CapabilitiesFetcher, CapsyncConfig, Config, CredentialsFileResolver,
    HttpCapabilitiesApi, JsonAccountStore,
};

/// Loaded configuration plus the resolved data paths.
pub(crate) struct Context {
    pub config: CapsyncConfig,
    pub paths: Config,
}

impl Context {
    pub fn load() -> Self {
        let config = load_config_with_warning();
        let paths = Config::from_storage(&config.storage);
        Self { config, paths }
    }

    pub fn account_store(&self) -> JsonAccountStore {
        JsonAccountStore::new(self.paths.accounts_file())
    }

    pub fn schedule_manager(&self) -> ScheduleManager {
        let port = Arc::new(FileScheduler::new(self.paths.schedules_file()));
        ScheduleManager::from_config(port, &self.config.schedule)
    }

    pub fn coordinator(&self) -> Result<AccountRefreshCoordinator, Box<dyn std::error::Error>> {
        let store = Arc::new(self.account_store());
        let sessions = Arc::new(CredentialsFileResolver::new(self.paths.credentials_file()));
        let api = Arc::new(HttpCapabilitiesApi::new(&self.config.http)?);
        let fetcher = CapabilitiesFetcher::new(sessions, api);

        Ok(AccountRefreshCoordinator::new(store, fetcher)
            .with_unavailable_limit(self.config.refresh.max_consecutive_unavailable))
    }
}

/// Load the config hierarchy, falling back to defaults with a warning on
/// stderr when a config file is broken.
pub(crate) fn load_config_with_warning() -> CapsyncConfig {
    match CapsyncConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            warn!(event = "cli.config_load_failed", error = %e);
            eprintln!("Warning: Could not load config: {}. Using defaults.", e);
            eprintln!(
                "Tip: Check ~/.capsync/config.toml and ./.capsync/config.toml for syntax errors."
            );
            CapsyncConfig::default()
        }
    }
}
