//! HTTP surface: the refresh trigger, read endpoints and the WebSocket feed.

pub mod monitor;
pub mod ticker;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::SharedState;

/// Build the full router around `state`.
pub fn router(state: SharedState) -> Router {
    // Dashboard may be served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Trigger ───────────────────────────────────────────────────────────
        .route("/api/refresh", post(ticker::trigger_refresh))
        // ── Display ───────────────────────────────────────────────────────────
        .route("/api/ticker",  get(ticker::get_ticker))
        .route("/api/chart",   get(ticker::get_chart))
        .route("/api/health",  get(ticker::health_check))
        .route("/ws/monitor",  get(monitor::ws_monitor))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
