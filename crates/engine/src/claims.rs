//! Outbound claims payload.
//!
//! Wire shape:
//!
//! ```json
//! { "data": { "@odata.type": "microsoft.graph.onTokenIssuanceStartResponseData",
//!     "actions": [ { "@odata.type": "microsoft.graph.tokenIssuanceStart.provideClaimsForToken",
//!         "claims": { "CorrelationId": "...", "UPN": "...",
//!                     "ApiVersion": "1.0.0", "CustomRoles": ["Writer", "Editor"] } } ] } }
//! ```
//!
//! `CorrelationId` and `UPN` are omitted when empty. `ApiVersion` and
//! `CustomRoles` are always present.

use serde::Serialize;

/// Claims API version stamped on every response.
pub const API_VERSION: &str = "1.0.0";

/// Roles granted to every resolved or unresolved user.
pub const DEFAULT_CUSTOM_ROLES: [&str; 2] = ["Writer", "Editor"];

pub const RESPONSE_DATA_TYPE: &str = "microsoft.graph.onTokenIssuanceStartResponseData";
pub const PROVIDE_CLAIMS_ACTION_TYPE: &str =
    "microsoft.graph.tokenIssuanceStart.provideClaimsForToken";

/// Claims for one token issuance. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsResponse {
    pub correlation_id: String,
    pub api_version: &'static str,
    pub upn: String,
    pub custom_roles: Vec<String>,
}

impl ClaimsResponse {
    pub fn build<R, S>(correlation_id: impl Into<String>, upn: impl Into<String>, roles: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            correlation_id: correlation_id.into(),
            api_version: API_VERSION,
            upn: upn.into(),
            custom_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Build with [`DEFAULT_CUSTOM_ROLES`].
    pub fn with_default_roles(correlation_id: impl Into<String>, upn: impl Into<String>) -> Self {
        Self::build(correlation_id, upn, DEFAULT_CUSTOM_ROLES)
    }

    /// Wrap in the token-issuance response envelope.
    pub fn into_envelope(self) -> ResponseContent {
        ResponseContent {
            data: ResponseData {
                odata_type: RESPONSE_DATA_TYPE,
                actions: vec![ProvideClaimsAction {
                    odata_type: PROVIDE_CLAIMS_ACTION_TYPE,
                    claims: Claims {
                        correlation_id: Some(self.correlation_id).filter(|s| !s.is_empty()),
                        upn: Some(self.upn).filter(|s| !s.is_empty()),
                        api_version: self.api_version,
                        custom_roles: self.custom_roles,
                    },
                }],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseContent {
    pub data: ResponseData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseData {
    #[serde(rename = "@odata.type")]
    pub odata_type: &'static str,
    pub actions: Vec<ProvideClaimsAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvideClaimsAction {
    #[serde(rename = "@odata.type")]
    pub odata_type: &'static str,
    pub claims: Claims,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(rename = "UPN", skip_serializing_if = "Option::is_none")]
    pub upn: Option<String>,
    pub api_version: &'static str,
    pub custom_roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_envelope() {
        let envelope = ClaimsResponse::with_default_roles(
            "f3b0c6a2-6d1e-4c55-9c1b-8d2f0e6a7b10",
            "jsmith@contoso.com",
        )
        .into_envelope();

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "data": {
                    "@odata.type": "microsoft.graph.onTokenIssuanceStartResponseData",
                    "actions": [{
                        "@odata.type": "microsoft.graph.tokenIssuanceStart.provideClaimsForToken",
                        "claims": {
                            "CorrelationId": "f3b0c6a2-6d1e-4c55-9c1b-8d2f0e6a7b10",
                            "UPN": "jsmith@contoso.com",
                            "ApiVersion": "1.0.0",
                            "CustomRoles": ["Writer", "Editor"]
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_empty_fields_omitted() {
        let envelope = ClaimsResponse::with_default_roles("", "").into_envelope();
        let value = serde_json::to_value(&envelope).unwrap();
        let claims = &value["data"]["actions"][0]["claims"];

        assert!(claims.get("CorrelationId").is_none());
        assert!(claims.get("UPN").is_none());
        assert_eq!(claims["ApiVersion"], "1.0.0");
        assert_eq!(claims["CustomRoles"], json!(["Writer", "Editor"]));
    }

    #[test]
    fn test_custom_roles_are_passed_through() {
        let response = ClaimsResponse::build("c", "u", ["Reader"]);
        assert_eq!(response.custom_roles, vec!["Reader".to_string()]);
        assert_eq!(response.api_version, API_VERSION);
    }
}
