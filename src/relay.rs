//! The forwarding contract: validate the caller's input, make the upstream
//! call(s), and turn the upstream reply into what the dashboard receives.
//!
//! Upstream payloads are only inspected for the token's presence and the
//! HTTP status. Everything else goes back verbatim.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::RelayError;
use crate::graph::{require, GraphApi, StatsResponse, TokenResponse, WabaQuery};

/// Exchange an Embedded Signup code for an access token and, when enabled,
/// attach the business asset tree visible to that token.
pub async fn exchange_code(
    graph: &dyn GraphApi,
    config: &Config,
    code: &str,
) -> Result<TokenResponse, RelayError> {
    require("code", code)?;

    let (app_id, app_secret) = config.app_credentials().ok_or_else(|| {
        tracing::error!("FB_APP_ID / FB_APP_SECRET not configured");
        RelayError::Configuration("Missing App Credentials".into())
    })?;

    let token = graph.exchange_code(app_id, app_secret, code).await?;

    let access_token = match token.body.get("access_token").and_then(Value::as_str) {
        Some(t) => t.to_string(),
        None => {
            warn!(status = token.status, "Token exchange rejected by Graph API");
            return Err(RelayError::UpstreamRejection(token.body));
        }
    };

    let business_assets = if config.fetch_business_assets {
        // The token is already issued; losing it over a failed asset lookup helps nobody.
        match graph.business_assets(&access_token).await {
            Ok(assets) => Some(assets.body),
            Err(e) => {
                warn!("Business asset fetch failed: {e}");
                None
            }
        }
    } else {
        None
    };

    info!("Exchanged Embedded Signup code for access token");

    Ok(TokenResponse {
        access_token,
        expires_in: token.body.get("expires_in").cloned(),
        token_type: token.body.get("token_type").cloned(),
        business_assets,
    })
}

/// Message analytics for one WABA. `analytics` is `[]` when upstream sends no data.
pub async fn get_stats(
    graph: &dyn GraphApi,
    query: &WabaQuery,
) -> Result<StatsResponse, RelayError> {
    query.validate()?;

    let body = graph
        .analytics(&query.waba_id, &query.access_token)
        .await?
        .into_success("Failed to fetch analytics")
        .inspect_err(|e| warn!(waba_id = %query.waba_id, "Analytics request failed: {e}"))?;

    let analytics = match body.get("data") {
        Some(data) if !data.is_null() => data.clone(),
        _ => json!([]),
    };

    Ok(StatsResponse {
        waba_id: query.waba_id.clone(),
        analytics,
    })
}

/// Phone numbers registered on one WABA, exactly as upstream returns them.
pub async fn get_phone_numbers(
    graph: &dyn GraphApi,
    query: &WabaQuery,
) -> Result<Value, RelayError> {
    query.validate()?;

    graph
        .phone_numbers(&query.waba_id, &query.access_token)
        .await?
        .into_success("Failed to fetch phone numbers")
        .inspect_err(|e| warn!(waba_id = %query.waba_id, "Phone number request failed: {e}"))
}
