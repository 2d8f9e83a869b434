//! Server configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INACTIVITY_HOURS: u64 = 12;

/// Settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON snapshot loaded at startup, if any.
    pub snapshot: Option<PathBuf>,
    /// Loaded tournaments idle for this long are dropped.
    pub inactivity_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            snapshot: None,
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_HOURS * 3600),
        }
    }
}

impl ServerConfig {
    /// Read HOST, PORT, SNAPSHOT and INACTIVITY_HOURS. Unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let hours = parse_or("INACTIVITY_HOURS", lookup("INACTIVITY_HOURS"), DEFAULT_INACTIVITY_HOURS);
        Self {
            host,
            port,
            snapshot: lookup("SNAPSHOT").filter(|p| !p.is_empty()).map(PathBuf::from),
            inactivity_timeout: Duration::from_secs(hours.saturating_mul(3600)),
        }
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
