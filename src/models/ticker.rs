//! # models::ticker
//!
//! Wire format of the Mercado Bitcoin ticker endpoint and [`TickerReading`],
//! the typed result of a single fetch.
//!
//! ```json
//! { "ticker": { "high": "350012.5", "low": "341000.0", "vol": "31.2",
//!               "last": "348765.43", "buy": "348700.1", "sell": "348790.0",
//!               "open": "345000.0", "date": 1729080000 } }
//! ```
//!
//! Every field is optional on the wire, and `last` / `date` are accepted as
//! either JSON strings or numbers.  A body that decodes but carries no usable
//! price produces a reading with `last_price = None`; the caller treats that
//! as "nothing to chart" rather than as a failure.  Only `last` and `date` are
//! decoded, the rest of the object is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level body returned by `GET api/BTC/ticker/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerResponse {
    #[serde(default)]
    pub ticker: Option<TickerPayload>,
}

/// The `ticker` object.  Kept as raw JSON values so a number where a string
/// was expected (or the reverse) degrades to "absent" instead of failing the
/// whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerPayload {
    /// Last price, normally a string-encoded decimal.
    #[serde(default)]
    pub last: Option<Value>,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub date: Option<Value>,
}

/// Parsed result of one fetch.  Lives for one refresh cycle only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TickerReading {
    /// Last traded price in BRL; `None` when missing or unparseable.
    pub last_price: Option<f64>,
    /// Exchange timestamp in seconds; `None` when missing.
    pub timestamp_seconds: Option<i64>,
}

impl TickerReading {
    pub fn from_wire(body: &TickerResponse) -> Self {
        match &body.ticker {
            Some(ticker) => Self {
                last_price: ticker.last.as_ref().and_then(decimal_from_json),
                timestamp_seconds: ticker.date.as_ref().and_then(seconds_from_json),
            },
            None => Self::default(),
        }
    }

    /// `true` when the reading carries a price that should reach the chart.
    #[inline]
    pub fn has_price(&self) -> bool {
        self.last_price.is_some()
    }
}

/// Parse a string-encoded decimal.  `NaN` and infinities are rejected: the
/// chart cannot plot them.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// String or number → finite `f64`; anything else is absent.
fn decimal_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::String(raw) => parse_decimal(raw),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Integer or integer string → epoch seconds; anything else is absent.
fn seconds_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}
