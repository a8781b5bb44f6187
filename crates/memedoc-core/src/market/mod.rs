//! Market Data Integration
//!
//! Token lookups against DEX aggregators, plus a TTL cache decorator.

mod cache;
mod dexscreener;
mod mock;

pub use cache::{CachedMarketClient, DEFAULT_CACHE_TTL, DEFAULT_MAX_ENTRIES};
pub use dexscreener::{DexScreenerClient, DexScreenerConfig};
pub use mock::{DEMO_ADDRESS, MockMarketClient};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::TokenPair;

/// Market data client trait (Strategy pattern)
///
/// `Ok(None)` means the source answered but knows no pair for the address.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Look up the most liquid pair for a token contract address
    async fn token_info(&self, address: &str) -> Result<Option<TokenPair>>;

    /// Source name
    fn name(&self) -> &str;
}

/// Trim an address and reject it when empty
pub(crate) fn normalize_address(address: &str) -> Result<&str> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(crate::error::MemeDocError::InvalidAddress(address.to_string()));
    }
    Ok(trimmed)
}
