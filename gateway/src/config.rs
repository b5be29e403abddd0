//! Environment-driven settings for the gateway binary.
//!
//! | Variable | Default |
//! |---|---|
//! | `GATEWAY_HOST` | `127.0.0.1` |
//! | `GATEWAY_PORT` | `8080` |
//! | `PRODUCT_API_URL` | `http://127.0.0.1:3000/products` |
//! | `PRODUCT_API_TIMEOUT_SECS` | `30` |
//! | `LOG_FORMAT` | `compact` (or `json`) |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:3000/products";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset and blank values fall back to the
    /// defaults; present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Config::default();

        if let Some(host) = get("GATEWAY_HOST") {
            cfg.host = host.trim().to_string();
        }
        if let Some(raw) = get("GATEWAY_PORT") {
            cfg.port = raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| invalid("GATEWAY_PORT", raw, "a port in 1..=65535"))?;
        }
        if let Some(url) = get("PRODUCT_API_URL") {
            cfg.upstream_url = url.trim().to_string();
        }
        if let Some(raw) = get("PRODUCT_API_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| invalid("PRODUCT_API_TIMEOUT_SECS", raw, "a positive number of seconds"))?;
            cfg.upstream_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get("LOG_FORMAT") {
            cfg.log_format = raw
                .parse()
                .map_err(|_| invalid("LOG_FORMAT", raw, "`compact` or `json`"))?;
        }
        Ok(cfg)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn invalid(var: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value,
        expected,
    }
}
