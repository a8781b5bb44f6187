//! Mock Market Client
//!
//! For testing and offline demo purposes. Serves a fixed set of pairs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use super::{MarketDataClient, normalize_address};
use crate::error::{MemeDocError, Result};
use crate::model::TokenPair;

/// Well-known BONK mint, served by `MockMarketClient::demo()`
pub const DEMO_ADDRESS: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

/// Mock market client with static pairs
pub struct MockMarketClient {
    tokens: HashMap<String, TokenPair>,
    available: bool,
    latency: Option<StdDuration>,
    calls: AtomicUsize,
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketClient {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
            available: true,
            latency: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A client whose every lookup fails upstream
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Preloaded with a single realistic pair at `DEMO_ADDRESS`
    pub fn demo() -> Self {
        let mut bonk = TokenPair::new("Bonk", "Bonk", DEMO_ADDRESS);
        bonk.dex_id = "raydium".into();
        bonk.price_usd = Some(dec!(0.00002150));
        bonk.price_change_h24 = Some(dec!(-3.42));
        bonk.liquidity_usd = dec!(8_450_000);
        bonk.volume_h24 = dec!(3_125_400);
        bonk.pair_created_at = Some(Utc::now() - Duration::days(400));

        Self::new().with_token(DEMO_ADDRESS, bonk)
    }

    pub fn with_token(mut self, address: impl Into<String>, pair: TokenPair) -> Self {
        self.tokens.insert(address.into(), pair);
        self
    }

    /// Delay every lookup, simulating a slow upstream
    pub fn with_latency(mut self, latency: StdDuration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of lookups served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataClient for MockMarketClient {
    async fn token_info(&self, address: &str) -> Result<Option<TokenPair>> {
        let address = normalize_address(address)?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if !self.available {
            return Err(MemeDocError::Upstream("mock market unavailable".into()));
        }
        Ok(self.tokens.get(address).cloned())
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}
