//! Blocking OCS client for the capabilities and user endpoints.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, ETAG, IF_NONE_MATCH};
use tracing::debug;

use crate::capabilities::errors::FetchError;
use crate::capabilities::parse::{parse_capabilities, parse_display_name};
use crate::capabilities::traits::CapabilitiesApi;
use crate::capabilities::types::CapabilitiesResponse;
use crate::config::HttpConfig;
use crate::session::SessionHandle;

pub const CAPABILITIES_PATH: &str = "ocs/v2.php/cloud/capabilities";
pub const USER_PATH: &str = "ocs/v2.php/cloud/user";

/// [`CapabilitiesApi`] speaking the OCS protocol over HTTP(S).
///
/// Timeouts come from [`HttpConfig`]; no retries are made here.
#[derive(Debug, Clone)]
pub struct HttpCapabilitiesApi {
    client: Client,
}

impl HttpCapabilitiesApi {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    fn ocs_get(&self, session: &SessionHandle, path: &str) -> RequestBuilder {
        self.client
            .get(session.url(path))
            .query(&[("format", "json")])
            .basic_auth(&session.user, Some(&session.app_password))
            .header("OCS-APIRequest", "true")
            .header(ACCEPT, "application/json")
    }
}

fn status_error(response: Response) -> FetchError {
    let status = response.status();
    FetchError::HttpStatus {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}

impl CapabilitiesApi for HttpCapabilitiesApi {
    fn fetch_capabilities(
        &self,
        session: &SessionHandle,
        etag: Option<&str>,
    ) -> Result<CapabilitiesResponse, FetchError> {
        let mut request = self.ocs_get(session, CAPABILITIES_PATH);
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        let response = request.send()?;
        let status = response.status();

        debug!(
            event = "core.capabilities.response_received",
            account_name = %session.account_name,
            status = status.as_u16()
        );

        if status == StatusCode::NOT_MODIFIED {
            return Ok(CapabilitiesResponse::NotModified);
        }
        if !status.is_success() {
            return Err(status_error(response));
        }

        let new_etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        parse_capabilities(&body, new_etag.as_deref()).map(CapabilitiesResponse::Fresh)
    }

    fn fetch_display_name(&self, session: &SessionHandle) -> Result<String, FetchError> {
        let response = self.ocs_get(session, USER_PATH).send()?;
        if !response.status().is_success() {
            return Err(status_error(response));
        }

        let body = response.text()?;
        parse_display_name(&body)
    }
}
