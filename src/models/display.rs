//! # models::display
//!
//! [`TickerDisplay`] — the two text labels of the dashboard (formatted price
//! and formatted timestamp) plus the raw values they were rendered from.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerDisplay {
    /// `R$ 348.765,43`.  `None` until a fetch has produced a usable price.
    pub price_label: Option<String>,

    /// `dd/MM/yyyy HH:mm:ss` in server local time, or `—` when the exchange
    /// sent no timestamp.
    pub date_label: String,

    pub last_price: Option<f64>,
    pub timestamp_seconds: Option<i64>,

    /// When this service received the response.
    pub fetched_at: DateTime<Utc>,
}
