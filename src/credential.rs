use std::fmt::{Debug, Formatter};
use std::str::FromStr;

/// An opaque API token sent as `X-Dataverse-key` with every request.
///
/// The token is read-only once created and is cloned into every handle
/// returned by the native API, so chained calls never need it re-specified.
/// Its `Debug` output never reveals the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        ApiKey(secret.into())
    }

    /// The raw secret, as placed in the request header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl FromStr for ApiKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("API token must not be empty".to_string());
        }
        Ok(ApiKey(trimmed.to_string()))
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        ApiKey(value.to_string())
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        ApiKey(value)
    }
}
