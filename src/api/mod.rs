//! HTTP surface of the relay.
//!
//! - `/`                            — health check
//! - `/api/auth/whatsapp`           — Embedded Signup code exchange
//! - `/api/dashboard/stats`         — WABA message analytics
//! - `/api/dashboard/phone-numbers` — WABA phone numbers

pub mod routes;

use crate::SharedState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::relay_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
