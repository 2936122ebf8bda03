//! # config — read the monitor's settings from environment variables
//!
//! | Variable                | Default                                          |
//! |-------------------------|--------------------------------------------------|
//! | `BIND_ADDR`             | `0.0.0.0:3000`                                   |
//! | `TICKER_URL`            | `https://www.mercadobitcoin.net/api/BTC/ticker/` |
//! | `HTTP_TIMEOUT_SECS`     | `10` (must be at least `1`)                      |
//! | `REFRESH_INTERVAL_SECS` | unset = manual refresh only (`0` also disables)  |

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TICKER_URL: &str = "https://www.mercadobitcoin.net/api/BTC/ticker/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr:        SocketAddr,
    /// Full URL of the ticker endpoint
    pub ticker_url:       String,
    /// Per-request timeout for the ticker call
    pub http_timeout:     Duration,
    /// Background refresh period; `None` = only `POST /api/refresh` fetches
    pub refresh_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000")?;

        let ticker_url = lookup("TICKER_URL").unwrap_or_else(|| DEFAULT_TICKER_URL.to_string());
        if !(ticker_url.starts_with("http://") || ticker_url.starts_with("https://")) {
            anyhow::bail!("TICKER_URL must be an http(s) URL, got '{ticker_url}'");
        }

        let timeout_secs: u64 = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a number")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be at least 1");
        }

        let refresh_interval = match lookup("REFRESH_INTERVAL_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .context("REFRESH_INTERVAL_SECS must be a number")?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            ticker_url,
            http_timeout: Duration::from_secs(timeout_secs),
            refresh_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.ticker_url, DEFAULT_TICKER_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.refresh_interval, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("TICKER_URL", "http://localhost:9000/api/BTC/ticker/"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("REFRESH_INTERVAL_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.ticker_url, "http://localhost:9000/api/BTC/ticker/");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_interval_disables_auto_refresh() {
        let config = load(&[("REFRESH_INTERVAL_SECS", "0")]).unwrap();
        assert_eq!(config.refresh_interval, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load(&[("BIND_ADDR", "not an addr")]).is_err());
        assert!(load(&[("TICKER_URL", "ftp://example.com")]).is_err());
        assert!(load(&[("HTTP_TIMEOUT_SECS", "ten")]).is_err());
        assert!(load(&[("REFRESH_INTERVAL_SECS", "-5")]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load(&[("HTTP_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("at least 1"));

        let config = load(&[("HTTP_TIMEOUT_SECS", "1")]).unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(1));
    }
}
