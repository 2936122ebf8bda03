//! Fetch, history and rendering logic behind the dashboard.

pub mod format;
pub mod history;
pub mod refresh;
pub mod ticker_client;
