//! Domain models shared across the monitor.

pub mod chart;
pub mod display;
pub mod ticker;

pub use chart::{ChartSeries, PricePoint};
pub use display::TickerDisplay;
pub use ticker::{TickerReading, TickerResponse};
