//! Parsing of OCS capabilities and user responses.

use serde::Deserialize;
use serde_json::Value;

use crate::capabilities::errors::FetchError;
use crate::capabilities::types::CapabilitiesSnapshot;

#[derive(Debug, Deserialize)]
struct OcsEnvelope<T> {
    ocs: Ocs<T>,
}

#[derive(Debug, Deserialize)]
struct Ocs<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct CapabilitiesData {
    #[serde(default)]
    capabilities: Capabilities,
}

#[derive(Debug, Default, Deserialize)]
struct Capabilities {
    #[serde(default)]
    theming: Option<Theming>,
    #[serde(default)]
    notes: Option<Notes>,
    #[serde(default)]
    files: Option<Files>,
}

#[derive(Debug, Deserialize)]
struct Theming {
    #[serde(default)]
    color: String,
}

#[derive(Debug, Deserialize)]
struct Notes {
    #[serde(default)]
    api_version: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Files {
    #[serde(default, rename = "directEditing")]
    direct_editing: Option<DirectEditing>,
}

#[derive(Debug, Deserialize)]
struct DirectEditing {
    #[serde(default, rename = "supportsFileId")]
    supports_file_id: bool,
}

#[derive(Debug, Deserialize)]
struct UserData {
    #[serde(default, rename = "display-name", alias = "displayname")]
    display_name: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

fn invalid(what: &str, e: serde_json::Error) -> FetchError {
    FetchError::InvalidResponse {
        message: format!("{}: {}", what, e),
    }
}

/// Render the advertised notes API version(s).
///
/// A single string is kept verbatim, a list of versions is kept as compact
/// JSON, anything missing becomes an empty string.
fn api_version_string(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

/// Parse a capabilities response body.
///
/// `etag` is the `ETag` response header, if any.
pub fn parse_capabilities(
    body: &str,
    etag: Option<&str>,
) -> Result<CapabilitiesSnapshot, FetchError> {
    let envelope: OcsEnvelope<CapabilitiesData> =
        serde_json::from_str(body).map_err(|e| invalid("capabilities", e))?;
    let capabilities = envelope.ocs.data.capabilities;

    let brand_color = capabilities
        .theming
        .map(|t| t.color)
        .unwrap_or_default();
    let api_version = api_version_string(capabilities.notes.and_then(|n| n.api_version));
    let direct_editing_available = capabilities
        .files
        .and_then(|f| f.direct_editing)
        .is_some_and(|d| d.supports_file_id);

    Ok(CapabilitiesSnapshot::new(
        etag.unwrap_or_default(),
        brand_color,
        api_version,
        direct_editing_available,
    ))
}

/// Parse a user response body into a display name, falling back to the
/// user id when the server has no display name set.
pub fn parse_display_name(body: &str) -> Result<String, FetchError> {
    let envelope: OcsEnvelope<UserData> =
        serde_json::from_str(body).map_err(|e| invalid("user", e))?;
    let user = envelope.ocs.data;

    user.display_name
        .filter(|name| !name.trim().is_empty())
        .or(user.id)
        .ok_or_else(|| FetchError::InvalidResponse {
            message: "user response has neither display-name nor id".to_string(),
        })
}
