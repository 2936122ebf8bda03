//! # Monitor Crypto — Bitcoin (BRL) Price Monitor
//!
//! ```text
//!  ┌─────────────┐  POST /api/refresh   ┌──────────────────────────┐  GET api/BTC/ticker/
//!  │  Dashboard  │ ───────────────────▶ │ AppState                 │ ───────────────────▶ Mercado
//!  │  / curl     │                      │ ├─ history (last 50)     │ ◀─────────────────── Bitcoin
//!  └─────────────┘                      │ ├─ display labels        │
//!        ▲         GET /api/ticker      │ ├─ refresh_in_flight     │
//!        │         GET /api/chart       │ └─ broadcast_tx ───────┐ │
//!        │                              └────────────────────────┼─┘
//!        └──────────────── ws://host/ws/monitor ◀────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! | Variable                | Default                                          |
//! |-------------------------|--------------------------------------------------|
//! | `BIND_ADDR`             | `0.0.0.0:3000`                                   |
//! | `TICKER_URL`            | `https://www.mercadobitcoin.net/api/BTC/ticker/` |
//! | `HTTP_TIMEOUT_SECS`     | `10` (must be at least `1`)                      |
//! | `REFRESH_INTERVAL_SECS` | unset (manual refresh only)                      |
//! | `RUST_LOG`              | `monitor_crypto=debug`                           |

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod engine;
mod error;
mod events;
mod models;
mod routes;
mod state;

use config::Config;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("monitor_crypto=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        MONITOR CRYPTO — BTC / BRL             ║
  ║        Ticker · Rolling Chart · Live Feed     ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Config & shared state ──────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let addr = config.bind_addr;
    let refresh_interval = config.refresh_interval;

    info!(
        ticker_url = %config.ticker_url,
        timeout    = ?config.http_timeout,
        interval   = ?config.refresh_interval,
        "Config loaded"
    );

    let state = build_state(config);

    // ── 4. Optional auto refresh ──────────────────────────────────────────────
    if let Some(period) = refresh_interval {
        tokio::spawn(engine::refresh::auto_refresh(state.clone(), period));
    }

    // ── 5. Bind & Serve ───────────────────────────────────────────────────────
    let app = routes::router(state);

    info!(?addr, "🚀 Monitor server starting");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
