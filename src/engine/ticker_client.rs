//! # engine::ticker_client
//!
//! The **Ticker Client** — one `GET` to the fixed ticker endpoint per call,
//! no retries.
//!
//! | Outcome                              | Result                             |
//! |--------------------------------------|------------------------------------|
//! | 2xx + decodable body                 | `Ok(TickerReading)`                |
//! | 2xx + `last` missing / unparseable   | `Ok` with `last_price = None`      |
//! | non-2xx                              | `Err(FetchError::HttpStatus)`      |
//! | connect error, timeout, bad body     | `Err(FetchError::Transport)`       |

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{TickerReading, TickerResponse};

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("ticker endpoint returned HTTP {code}")]
    HttpStatus { code: u16 },

    /// Network failure, timeout, or a body that could not be decoded.
    #[error("ticker request failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// Human-readable text shown to the user for this failure.
    pub fn label(&self) -> String {
        match self {
            FetchError::HttpStatus { code } => status_label(*code).to_string(),
            FetchError::Transport(message) => format!("Request failed: {message}"),
        }
    }
}

/// Fixed label table for HTTP failures.
pub fn status_label(code: u16) -> &'static str {
    match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Unknown error",
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TickerClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl TickerClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current ticker.  Exactly one attempt.
    pub async fn fetch_ticker(&self) -> Result<TickerReading, FetchError> {
        debug!(url = %self.url, "Fetching ticker...");

        let resp = self
            .http
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %self.url, "Ticker endpoint rejected request");
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body: TickerResponse = resp
            .json()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let reading = TickerReading::from_wire(&body);
        if !reading.has_price() {
            let raw = body.ticker.as_ref().and_then(|t| t.last.as_ref());
            warn!(last = ?raw, "Ticker carried no usable price");
        }

        Ok(reading)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A ticker endpoint that always answers `status` with `body`.
    pub(crate) async fn fixed_endpoint(status: StatusCode, body: &'static str) -> String {
        let router = Router::new().route(
            "/api/BTC/ticker/",
            get(move || async move {
                (status, [("content-type", "application/json")], body)
            }),
        );
        format!("{}/api/BTC/ticker/", serve(router).await)
    }

    fn client(url: String) -> TickerClient {
        TickerClient::new(reqwest::Client::new(), url, Duration::from_secs(5))
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(400), "Bad Request");
        assert_eq!(status_label(401), "Unauthorized");
        assert_eq!(status_label(403), "Forbidden");
        assert_eq!(status_label(404), "Not Found");
        assert_eq!(status_label(500), "Unknown error");
        assert_eq!(status_label(418), "Unknown error");
    }

    #[test]
    fn test_transport_label() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(err.label(), "Request failed: connection refused");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = fixed_endpoint(
            StatusCode::OK,
            r#"{"ticker":{"last":"348765.43","date":1729080000}}"#,
        )
        .await;

        let reading = client(url).fetch_ticker().await.unwrap();
        assert_eq!(reading.last_price, Some(348765.43));
        assert_eq!(reading.timestamp_seconds, Some(1729080000));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let url = fixed_endpoint(StatusCode::NOT_FOUND, "{}").await;

        let err = client(url).fetch_ticker().await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus { code: 404 });
        assert_eq!(err.label(), "Not Found");
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_unknown() {
        let url = fixed_endpoint(StatusCode::SERVICE_UNAVAILABLE, "{}").await;

        let err = client(url).fetch_ticker().await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus { code: 503 });
        assert_eq!(err.label(), "Unknown error");
    }

    #[tokio::test]
    async fn test_fetch_unparseable_price_is_not_an_error() {
        let url = fixed_endpoint(
            StatusCode::OK,
            r#"{"ticker":{"last":"not-a-number","date":1729080000}}"#,
        )
        .await;

        let reading = client(url).fetch_ticker().await.unwrap();
        assert_eq!(reading.last_price, None);
        assert_eq!(reading.timestamp_seconds, Some(1729080000));
    }

    #[tokio::test]
    async fn test_fetch_numeric_fields_are_accepted() {
        let url = fixed_endpoint(
            StatusCode::OK,
            r#"{"ticker":{"last":348765.43,"date":"1729080000"}}"#,
        )
        .await;

        let reading = client(url).fetch_ticker().await.unwrap();
        assert_eq!(reading.last_price, Some(348765.43));
        assert_eq!(reading.timestamp_seconds, Some(1729080000));
    }

    #[tokio::test]
    async fn test_fetch_boolean_last_is_absent_price() {
        let url = fixed_endpoint(
            StatusCode::OK,
            r#"{"ticker":{"last":true,"date":1729080000}}"#,
        )
        .await;

        let reading = client(url).fetch_ticker().await.unwrap();
        assert_eq!(reading.last_price, None);
        assert_eq!(reading.timestamp_seconds, Some(1729080000));
    }

    #[tokio::test]
    async fn test_fetch_garbage_body_is_transport() {
        let url = fixed_endpoint(StatusCode::OK, "<html>maintenance</html>").await;

        let err = client(url).fetch_ticker().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transport() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/api/BTC/ticker/"))
            .fetch_ticker()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(err.label().starts_with("Request failed: "));
    }
}
