use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// Body of `POST /api/auth/whatsapp`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub code: String,
}

/// Query of the dashboard routes. Missing fields deserialize as empty and
/// are rejected by [`WabaQuery::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WabaQuery {
    #[serde(default)]
    pub waba_id: String,
    #[serde(default)]
    pub access_token: String,
}

impl WabaQuery {
    pub fn validate(&self) -> Result<(), RelayError> {
        require("waba_id", &self.waba_id)?;
        require("access_token", &self.access_token)
    }
}

/// Reject a missing or empty caller-supplied field.
pub fn require(field: &str, value: &str) -> Result<(), RelayError> {
    if value.is_empty() {
        return Err(RelayError::Validation(format!("Field required: {field}")));
    }
    Ok(())
}

/// Token fields handed back to the dashboard after a code exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Copied verbatim from upstream; `null` when absent.
    pub expires_in: Option<Value>,
    pub token_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_assets: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub waba_id: String,
    pub analytics: Value,
}

/// One reply from the Graph API: status plus the body as loose JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResponse {
    pub status: u16,
    pub body: Value,
}

impl GraphResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The body on a 200, otherwise an [`RelayError::Upstream`] carrying the
    /// upstream status and body. `fallback` stands in for an empty body.
    pub fn into_success(self, fallback: &str) -> Result<Value, RelayError> {
        if self.is_success() {
            return Ok(self.body);
        }

        let body = match self.body {
            Value::Null => Value::String(fallback.to_string()),
            Value::String(s) if s.trim().is_empty() => Value::String(fallback.to_string()),
            other => other,
        };
        Err(RelayError::Upstream {
            status: self.status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_waba_query_requires_both_fields() {
        let query = WabaQuery {
            waba_id: "123".into(),
            access_token: String::new(),
        };
        assert!(matches!(query.validate(), Err(RelayError::Validation(_))));

        let query = WabaQuery {
            waba_id: "123".into(),
            access_token: "tok1".into(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_whitespace_values_count_as_present() {
        assert!(require("code", " ").is_ok());
        let query = WabaQuery {
            waba_id: " 123 ".into(),
            access_token: "\t".into(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_token_response_omits_missing_assets() {
        let token = TokenResponse {
            access_token: "tok1".into(),
            expires_in: None,
            token_type: Some(json!("bearer")),
            business_assets: None,
        };
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({ "access_token": "tok1", "expires_in": null, "token_type": "bearer" })
        );
    }

    #[test]
    fn test_into_success_forwards_error_body() {
        let resp = GraphResponse {
            status: 401,
            body: json!({ "error": { "message": "Invalid OAuth access token" } }),
        };
        match resp.into_success("unused") {
            Err(RelayError::Upstream { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body["error"]["message"], "Invalid OAuth access token");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_into_success_uses_fallback_for_empty_body() {
        let resp = GraphResponse {
            status: 500,
            body: Value::Null,
        };
        match resp.into_success("Failed to fetch phone numbers") {
            Err(RelayError::Upstream { body, .. }) => {
                assert_eq!(body, json!("Failed to fetch phone numbers"))
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
