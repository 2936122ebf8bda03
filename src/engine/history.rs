//! # engine::history
//!
//! **Price History** — the sliding window behind the chart.
//!
//! Holds the last [`HISTORY_CAPACITY`] prices in arrival order (oldest at the
//! front).  Appending to a full window evicts from the front first, so the
//! length never exceeds the capacity.
//!
//! Nothing here stores indices.  [`PriceHistory::project`] pairs each value
//! with its *current* position every time it is called, so after an eviction
//! the oldest surviving price is index `0` again.

use std::collections::VecDeque;

use crate::models::{ChartSeries, PricePoint};

/// Maximum number of prices kept for the chart.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct PriceHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A window with a custom bound.  A capacity of `0` is bumped to `1` so
    /// the newest value is always retained.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push `value` to the back, evicting the oldest while over capacity.
    ///
    /// No validation: zero, negative and huge values are all accepted.
    pub fn append(&mut self, value: f64) {
        self.values.push_back(value);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    /// Lazy `(index, value)` view over the live window.
    ///
    /// The iterator is `Clone`, so a consumer can walk it more than once; a
    /// fresh call always reflects the current contents.
    pub fn project(&self) -> impl Iterator<Item = PricePoint> + Clone + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &value)| PricePoint { index, value })
    }

    /// Collect the projection into the series handed to the chart.
    pub fn to_series(&self) -> ChartSeries {
        ChartSeries::new(self.project().collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent price, if any.
    #[inline]
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
