//! # state
//!
//! The monitor's **shared application state**.
//!
//! * `Arc<AppState>` is cloned into every Axum handler via
//!   `axum::extract::State` and into the auto-refresh task.
//! * The price history is owned here and only the refresh cycle
//!   (`engine::refresh`) writes to it; handlers take read locks.
//! * `refresh_in_flight` is the single-flight flag for fetch cycles.

use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::config::Config;
use crate::engine::history::PriceHistory;
use crate::engine::ticker_client::TickerClient;
use crate::events::WsEvent;
use crate::models::TickerDisplay;

// ─── AppState ─────────────────────────────────────────────────────────────────

pub struct AppState {
    pub config: Config,

    /// Ticker client (wraps a pooled `reqwest::Client`)
    pub client: TickerClient,

    // ── Display Controller ────────────────────────────────────────────────────
    /// Last 50 prices, oldest first
    pub history: RwLock<PriceHistory>,

    /// Text labels from the latest successful fetch; `None` before the first one
    pub display: RwLock<Option<TickerDisplay>>,

    /// `true` while a fetch cycle is running
    pub refresh_in_flight: AtomicBool,

    // ── Metrics ───────────────────────────────────────────────────────────────
    pub refresh_count: AtomicU64,
    pub failure_count: AtomicU64,

    // ── Monitor / WebSocket ───────────────────────────────────────────────────
    /// Pre-serialised `WsEvent` JSON for dashboard clients
    pub broadcast_tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (broadcast_tx, _) = broadcast::channel(256);
        let client = TickerClient::new(
            reqwest::Client::new(),
            config.ticker_url.clone(),
            config.http_timeout,
        );

        Self {
            config,
            client,
            history:           RwLock::new(PriceHistory::new()),
            display:           RwLock::new(None),
            refresh_in_flight: AtomicBool::new(false),
            refresh_count:     AtomicU64::new(0),
            failure_count:     AtomicU64::new(0),
            broadcast_tx,
        }
    }

    /// Send to every WebSocket client.  Having no listeners is fine.
    pub fn broadcast(&self, event: &WsEvent) {
        let _ = self.broadcast_tx.send(event.to_json());
    }
}

pub type SharedState = Arc<AppState>;

pub fn build_state(config: Config) -> SharedState {
    Arc::new(AppState::new(config))
}
