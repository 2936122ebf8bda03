//! # events
//!
//! [`WsEvent`] — everything the monitor pushes to dashboard WebSocket clients.
//!
//! Events are serialised to a JSON `String` before going onto the
//! `tokio::sync::broadcast` channel, which keeps the channel payload `Clone`.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{ChartSeries, TickerDisplay};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// A fetch completed; the text labels changed.
    TickerUpdated {
        cycle_id: Uuid,
        display:  Box<TickerDisplay>,
    },

    /// A new price entered the history window.
    ChartUpdated {
        cycle_id: Uuid,
        series:   ChartSeries,
    },

    /// The fetch failed; `message` is the label to show the user.
    RefreshFailed {
        cycle_id: Uuid,
        message:  String,
    },

    /// A trigger arrived while another refresh was running.
    RefreshRejected,
}

impl WsEvent {
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}
