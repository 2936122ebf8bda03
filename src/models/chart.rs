//! # models::chart
//!
//! What the dashboard's line chart consumes: one labelled series of
//! `(index, value)` points.  Values are plotted as-is, no smoothing or
//! resampling.

use serde::Serialize;

/// Legend shown next to the single line series.
pub const SERIES_LABEL: &str = "Preço do Bitcoin (BRL)";

/// One plotted point.  `index` is the point's current position in the
/// history window, not a stable identity: it shifts down by one every time
/// the oldest point is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<PricePoint>,
}

impl ChartSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self {
            label: SERIES_LABEL.to_string(),
            points,
        }
    }
}
