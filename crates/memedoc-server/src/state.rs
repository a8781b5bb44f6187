//! Application State

use std::sync::Arc;

use memedoc_core::market::{
    CachedMarketClient, DexScreenerClient, MarketDataClient, MockMarketClient,
};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Token lookups, cached
    pub market: Arc<dyn MarketDataClient>,
}

impl AppState {
    pub fn new(market: Arc<dyn MarketDataClient>) -> Self {
        Self { market }
    }

    /// Build the cached market client the config asks for
    pub fn from_config(config: &ServerConfig) -> memedoc_core::Result<Self> {
        let inner: Arc<dyn MarketDataClient> = if config.offline {
            Arc::new(MockMarketClient::demo())
        } else {
            Arc::new(DexScreenerClient::new(config.dexscreener.clone())?)
        };
        let cached = CachedMarketClient::new(inner, config.cache_ttl).with_max_entries(config.cache_max_entries);
        Ok(Self::new(Arc::new(cached)))
    }
}
