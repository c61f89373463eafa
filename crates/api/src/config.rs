//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use checkout::CheckoutConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `DATABASE_URL` — PostgreSQL URL; bookings are kept in memory when unset
/// - `CATALOG_PATH` — JSON catalog file; a built-in catalog is used when unset
/// - `CHECKOUT_PROCESSING_DELAY_MS` — simulated gateway pause (default: `2500`)
/// - `CHECKOUT_REDIRECT_DELAY_MS` — pause before completion (default: `2000`)
/// - `TICKET_SIZE` — rendered ticket edge length (default: `200`)
/// - `SESSION_IDLE_TIMEOUT_SECS` — idle time before a session is closed (default: `1800`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub catalog_path: Option<String>,
    pub checkout_processing_delay_ms: u64,
    pub checkout_redirect_delay_ms: u64,
    pub ticket_size: u32,
    pub session_idle_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// Unparseable values fall back to the default as well.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT").unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: parse_env("LOG_FORMAT").unwrap_or(defaults.log_format),
            database_url: non_empty_env("DATABASE_URL"),
            catalog_path: non_empty_env("CATALOG_PATH"),
            checkout_processing_delay_ms: parse_env("CHECKOUT_PROCESSING_DELAY_MS")
                .unwrap_or(defaults.checkout_processing_delay_ms),
            checkout_redirect_delay_ms: parse_env("CHECKOUT_REDIRECT_DELAY_MS")
                .unwrap_or(defaults.checkout_redirect_delay_ms),
            ticket_size: parse_env("TICKET_SIZE").unwrap_or(defaults.ticket_size),
            session_idle_timeout_secs: parse_env("SESSION_IDLE_TIMEOUT_SECS")
                .unwrap_or(defaults.session_idle_timeout_secs),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns how long a session may sit unused.
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    /// Returns the checkout timing.
    pub fn checkout(&self) -> CheckoutConfig {
        CheckoutConfig::from_millis(
            self.checkout_processing_delay_ms,
            self.checkout_redirect_delay_ms,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            database_url: None,
            catalog_path: None,
            checkout_processing_delay_ms: 2500,
            checkout_redirect_delay_ms: 2000,
            ticket_size: ticket::DEFAULT_SIZE,
            session_idle_timeout_secs: 1800,
        }
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
