//! # routes::ticker
//!
//! Refresh trigger and the dashboard's read endpoints.
//!
//! | Method | Path           | Description                                   |
//! |--------|----------------|-----------------------------------------------|
//! | POST   | `/api/refresh` | Run one fetch cycle (409 if one is running)   |
//! | GET    | `/api/ticker`  | Latest price / date labels                    |
//! | GET    | `/api/chart`   | Current `(index, value)` series               |
//! | GET    | `/api/health`  | Liveness and counters                         |

use std::sync::atomic::Ordering;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{engine::refresh::refresh, error::AppError, state::SharedState};

// ─── POST /api/refresh ────────────────────────────────────────────────────────

/// Manual refresh trigger.
pub async fn trigger_refresh(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = refresh(&state).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "ok":            true,
            "cycle_id":      outcome.cycle_id,
            "chart_updated": outcome.chart_updated,
            "display":       outcome.display,
            "series":        outcome.series,
        })),
    ))
}

// ─── GET /api/ticker ──────────────────────────────────────────────────────────

pub async fn get_ticker(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let guard = state.display.read().await;

    match guard.as_ref() {
        Some(display) => Ok(Json(json!({ "ok": true, "display": display }))),
        None => Err(AppError::NotFound(
            "No ticker yet. Trigger POST /api/refresh first.".into(),
        )),
    }
}

// ─── GET /api/chart ───────────────────────────────────────────────────────────

/// The projection is rebuilt from the live window on every call.
pub async fn get_chart(State(state): State<SharedState>) -> impl IntoResponse {
    let history = state.history.read().await;

    Json(json!({
        "ok":       true,
        "capacity": history.capacity(),
        "empty":    history.is_empty(),
        "series":   history.to_series(),
    }))
}

// ─── GET /api/health ──────────────────────────────────────────────────────────

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    let refresh_count = state.refresh_count.load(Ordering::Relaxed);
    let failure_count = state.failure_count.load(Ordering::Relaxed);
    let in_flight     = state.refresh_in_flight.load(Ordering::Acquire);
    let (points, latest_price) = {
        let history = state.history.read().await;
        (history.len(), history.latest())
    };

    Json(json!({
        "ok":            true,
        "refresh_count": refresh_count,
        "failure_count": failure_count,
        "in_flight":     in_flight,
        "points":        points,
        "latest_price":  latest_price,
        "auto_refresh_secs": state.config.refresh_interval.map(|d| d.as_secs()),
    }))
}
