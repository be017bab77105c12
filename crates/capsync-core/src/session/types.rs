use std::fmt;

/// Everything needed to make authenticated requests for one account.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub account_name: String,
    /// Server base URL without trailing slash, e.g. `https://cloud.example.com`.
    pub server_url: String,
    pub user: String,
    pub app_password: String,
}

impl SessionHandle {
    pub fn new(
        account_name: impl Into<String>,
        server_url: impl Into<String>,
        user: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
            user: user.into(),
            app_password: app_password.into(),
        }
    }

    /// Join an absolute API path onto the server URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }
}

// The app password must never reach log output.
impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("account_name", &self.account_name)
            .field("server_url", &self.server_url)
            .field("user", &self.user)
            .field("app_password", &"<redacted>")
            .finish()
    }
}
