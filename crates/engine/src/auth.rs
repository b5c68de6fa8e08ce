//! Bearer tokens from the client-credentials grant.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Access token for a single cloud resolution.
///
/// Owned by the acquisition that produced it and dropped with the request.
/// Never cached or reused.
pub struct AccessToken {
    value: SecretString,
    issued_for_resource: String,
}

impl AccessToken {
    pub fn new(value: SecretString, issued_for_resource: impl Into<String>) -> Self {
        Self {
            value,
            issued_for_resource: issued_for_resource.into(),
        }
    }

    /// Raw token value for the `Authorization` header.
    pub fn bearer(&self) -> &str {
        self.value.expose_secret()
    }

    /// The `resource` the token was requested for.
    pub fn issued_for_resource(&self) -> &str {
        &self.issued_for_resource
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("issued_for_resource", &self.issued_for_resource)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let token = AccessToken::new(
            SecretString::new("eyJ0eXAiOiJKV1QiLCJhbGciOi".to_string().into()),
            "https://graph.microsoft.com",
        );
        let debug_output = format!("{:?}", token);
        assert!(!debug_output.contains("eyJ0eXAi"));
        assert!(debug_output.contains("graph.microsoft.com"));
        assert_eq!(token.bearer(), "eyJ0eXAiOiJKV1QiLCJhbGciOi");
    }
}
