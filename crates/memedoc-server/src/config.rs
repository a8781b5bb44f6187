//! Server Configuration
//!
//! Read from the environment after `.env` is loaded.

use std::str::FromStr;
use std::time::Duration;

use memedoc_core::MemeDocError;
use memedoc_core::market::{DEFAULT_CACHE_TTL, DEFAULT_MAX_ENTRIES, DexScreenerConfig};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// How long token lookups stay cached
    pub cache_ttl: Duration,

    /// Most token addresses held in the cache at once
    pub cache_max_entries: usize,

    /// Serve the built-in demo token instead of calling DexScreener
    pub offline: bool,

    pub dexscreener: DexScreenerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            offline: false,
            dexscreener: DexScreenerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Unset variables fall back to defaults; unparsable numbers are a `Config` error
    pub fn from_env() -> memedoc_core::Result<Self> {
        let defaults = Self::default();
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let cache_ttl = parse_var::<u64>("MEMEDOC_CACHE_TTL_SECS")?
            .map_or(defaults.cache_ttl, Duration::from_secs);
        let cache_max_entries = parse_var("MEMEDOC_CACHE_MAX_ENTRIES")?.unwrap_or(defaults.cache_max_entries);
        let offline = std::env::var("MEMEDOC_OFFLINE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            cache_ttl,
            cache_max_entries,
            offline,
            dexscreener: DexScreenerConfig::from_env()?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> memedoc_core::Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| MemeDocError::Config(format!("{name} must be a whole number, got {raw:?}"))),
        Err(_) => Ok(None),
    }
}
