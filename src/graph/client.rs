use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::traits::GraphApi;
use super::types::GraphResponse;
use crate::error::RelayError;

/// Metrics requested from the WABA analytics edge.
pub const ANALYTICS_METRICS: &str = "messages_sent,messages_delivered,messages_read";

/// Field expansion for the asset tree fetched after Embedded Signup.
pub const BUSINESS_ASSET_FIELDS: &str = "businesses{whatsapp_business_accounts{phone_numbers}}";

/// Graph API client (Meta / WhatsApp Business).
///
/// Quirks:
/// - Every path is prefixed with the API version (`/v22.0/...`).
/// - Credentials and tokens travel as query parameters, not headers.
/// - The token endpoint is a GET.
/// - Error replies are JSON `{"error": {...}}` and are passed on untouched.
pub struct GraphClient {
    base_url: Url,
    api_version: String,
    http: reqwest::Client,
}

impl GraphClient {
    pub fn with_base_url(base_url: Url, api_version: impl Into<String>) -> Self {
        Self {
            base_url,
            api_version: api_version.into(),
            http: reqwest::Client::new(),
        }
    }

    /// `{base}/{version}/{segments...}`. Each segment is percent-encoded on
    /// its own, so a caller-supplied id cannot add path components.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayError::Internal("graph base url cannot carry a path".into()))?
            .pop_if_empty()
            .push(&self.api_version)
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, params: &[(&str, &str)]) -> Result<GraphResponse, RelayError> {
        tracing::debug!(path = url.path(), "graph GET");

        let resp = self.http.get(url).query(params).send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;

        Ok(GraphResponse {
            status,
            body: decode_body(&bytes),
        })
    }
}

/// JSON when it parses, the raw text as a JSON string otherwise, null when empty.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn exchange_code(
        &self,
        app_id: &str,
        app_secret: &str,
        code: &str,
    ) -> Result<GraphResponse, RelayError> {
        let url = self.endpoint(&["oauth", "access_token"])?;
        self.get(
            url,
            &[
                ("client_id", app_id),
                ("client_secret", app_secret),
                ("code", code),
            ],
        )
        .await
    }

    async fn business_assets(&self, access_token: &str) -> Result<GraphResponse, RelayError> {
        let url = self.endpoint(&["me"])?;
        self.get(
            url,
            &[
                ("fields", BUSINESS_ASSET_FIELDS),
                ("access_token", access_token),
            ],
        )
        .await
    }

    async fn analytics(
        &self,
        waba_id: &str,
        access_token: &str,
    ) -> Result<GraphResponse, RelayError> {
        let url = self.endpoint(&[waba_id, "analytics"])?;
        self.get(
            url,
            &[("access_token", access_token), ("metrics", ANALYTICS_METRICS)],
        )
        .await
    }

    async fn phone_numbers(
        &self,
        waba_id: &str,
        access_token: &str,
    ) -> Result<GraphResponse, RelayError> {
        let url = self.endpoint(&[waba_id, "phone_numbers"])?;
        self.get(url, &[("access_token", access_token)]).await
    }
}
