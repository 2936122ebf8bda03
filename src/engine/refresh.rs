//! # engine::refresh
//!
//! **Refresh Cycle** — fetch → update history → render labels → broadcast.
//!
//! ## Overlapping triggers
//! Only one cycle runs at a time.  A trigger that arrives while a fetch is in
//! flight is rejected with [`RefreshError::InFlight`] instead of starting a
//! second request, so responses can never land out of issue order.  The flag
//! is released by a drop guard, including on early return.
//!
//! ## Failure
//! A failed fetch leaves the history and the display exactly as they were.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::format::{format_brl, format_timestamp};
use crate::engine::ticker_client::FetchError;
use crate::events::WsEvent;
use crate::models::{ChartSeries, TickerDisplay, TickerReading};
use crate::state::SharedState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("a refresh is already in progress")]
    InFlight,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// What one successful cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub cycle_id:      Uuid,
    pub display:       TickerDisplay,
    pub series:        ChartSeries,
    /// `false` when the ticker carried no usable price.
    pub chart_updated: bool,
}

// ─── Single-flight guard ──────────────────────────────────────────────────────

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ─── Cycle ────────────────────────────────────────────────────────────────────

/// Run one fetch-and-render cycle.
pub async fn refresh(state: &SharedState) -> Result<RefreshOutcome, RefreshError> {
    let Some(_guard) = InFlight::claim(&state.refresh_in_flight) else {
        debug!("Refresh already in flight, rejecting trigger");
        state.broadcast(&WsEvent::RefreshRejected);
        return Err(RefreshError::InFlight);
    };

    let cycle_id = Uuid::new_v4();
    state.refresh_count.fetch_add(1, Ordering::Relaxed);
    debug!(%cycle_id, url = %state.client.url(), "🔄 Refresh cycle starting");

    match state.client.fetch_ticker().await {
        Ok(reading) => Ok(apply_reading(state, cycle_id, reading, Utc::now()).await),
        Err(err) => {
            state.failure_count.fetch_add(1, Ordering::Relaxed);
            let message = err.label();
            warn!(%cycle_id, error = %err, label = %message, "❌ Refresh failed");
            state.broadcast(&WsEvent::RefreshFailed { cycle_id, message });
            Err(err.into())
        }
    }
}

/// Fold a successful reading into the history and the display labels.
async fn apply_reading(
    state: &SharedState,
    cycle_id: Uuid,
    reading: TickerReading,
    fetched_at: DateTime<Utc>,
) -> RefreshOutcome {
    let (series, chart_updated) = {
        let mut history = state.history.write().await;
        let updated = match reading.last_price {
            Some(price) => {
                history.append(price);
                true
            }
            None => false,
        };
        (history.to_series(), updated)
    };

    let ticker_display = {
        let mut guard = state.display.write().await;
        let previous = guard.as_ref();

        // No usable price: keep the last price label, still move the date.
        let last_price = reading
            .last_price
            .or_else(|| previous.and_then(|d| d.last_price));

        let rendered = TickerDisplay {
            price_label: last_price.map(format_brl),
            date_label: format_timestamp(reading.timestamp_seconds, &Local),
            last_price,
            timestamp_seconds: reading.timestamp_seconds,
            fetched_at,
        };
        *guard = Some(rendered.clone());
        rendered
    };

    info!(
        %cycle_id,
        price  = ?reading.last_price,
        label  = ?ticker_display.price_label,
        date   = %ticker_display.date_label,
        points = series.points.len(),
        "✅ Ticker refreshed"
    );

    state.broadcast(&WsEvent::TickerUpdated {
        cycle_id,
        display: Box::new(ticker_display.clone()),
    });
    if chart_updated {
        state.broadcast(&WsEvent::ChartUpdated {
            cycle_id,
            series: series.clone(),
        });
    }

    RefreshOutcome {
        cycle_id,
        display: ticker_display,
        series,
        chart_updated,
    }
}

// ─── Auto Refresh ─────────────────────────────────────────────────────────────

/// Run [`refresh`] every `period`, forever.  Ticks that land while a manual
/// refresh is running are skipped by the in-flight guard.
pub async fn auto_refresh(state: SharedState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!(interval = ?period, "⏱️ Auto refresh enabled");

    loop {
        ticker.tick().await;
        match refresh(&state).await {
            Ok(outcome) => debug!(cycle_id = %outcome.cycle_id, "Auto refresh done"),
            Err(RefreshError::InFlight) => debug!("Auto refresh skipped: manual refresh in flight"),
            // Already logged inside the cycle.
            Err(RefreshError::Fetch(_)) => {}
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
