use serde::Serialize;

/// Capabilities returned by one successful, non-cached fetch.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitiesSnapshot {
    validation_token: String,
    brand_color: String,
    api_version: String,
    direct_editing_available: bool,
}

impl CapabilitiesSnapshot {
    pub fn new(
        validation_token: impl Into<String>,
        brand_color: impl Into<String>,
        api_version: impl Into<String>,
        direct_editing_available: bool,
    ) -> Self {
        Self {
            validation_token: validation_token.into(),
            brand_color: brand_color.into(),
            api_version: api_version.into(),
            direct_editing_available,
        }
    }

    pub fn validation_token(&self) -> &str {
        &self.validation_token
    }

    pub fn brand_color(&self) -> &str {
        &self.brand_color
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn direct_editing_available(&self) -> bool {
        self.direct_editing_available
    }
}

/// Answer to a conditional capabilities request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilitiesResponse {
    /// The sent validation token is still current.
    NotModified,
    Fresh(CapabilitiesSnapshot),
}
