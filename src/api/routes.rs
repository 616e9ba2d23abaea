//! Route handlers. Each one extracts its input, hands it to [`crate::relay`]
//! and serializes the result; errors render through `RelayError`.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::error::RelayError;
use crate::graph::{AuthRequest, StatsResponse, TokenResponse, WabaQuery};
use crate::relay;
use crate::SharedState;

pub fn relay_router(state: SharedState) -> Router {
    Router::new()
        // ── Health ───────────────────────────────────────────────────────
        .route("/", get(health_check))
        // ── OAuth + onboarding ───────────────────────────────────────────
        .route("/api/auth/whatsapp", post(whatsapp_auth))
        // ── Dashboard ────────────────────────────────────────────────────
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/dashboard/phone-numbers", get(phone_numbers))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "active",
        "message": "WhatsApp Backend is running",
    }))
}

/// POST /api/auth/whatsapp — Exchange an Embedded Signup code for a token
/// and fetch the WABA assets it can see.
async fn whatsapp_auth(
    State(state): State<SharedState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, RelayError> {
    let Json(body) = payload.map_err(|e| RelayError::Validation(e.body_text()))?;

    let token = relay::exchange_code(state.graph.as_ref(), &state.config, &body.code).await?;
    Ok(Json(token))
}

/// GET /api/dashboard/stats — Sent / delivered / read counts for a WABA.
async fn dashboard_stats(
    State(state): State<SharedState>,
    query: Result<Query<WabaQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, RelayError> {
    let Query(q) = query.map_err(|e| RelayError::Validation(e.body_text()))?;

    let stats = relay::get_stats(state.graph.as_ref(), &q).await?;
    Ok(Json(stats))
}

/// GET /api/dashboard/phone-numbers — Raw Graph API phone number listing.
async fn phone_numbers(
    State(state): State<SharedState>,
    query: Result<Query<WabaQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, RelayError> {
    let Query(q) = query.map_err(|e| RelayError::Validation(e.body_text()))?;

    let numbers = relay::get_phone_numbers(state.graph.as_ref(), &q).await?;
    Ok(Json(numbers))
}
