//! Cached Market Client
//!
//! TTL cache in front of any `MarketDataClient`. Both hits and "no pairs"
//! answers are cached; errors are not.
//!
//! Each address owns a slot behind its own async mutex, so concurrent
//! lookups for one address share a single upstream call while different
//! addresses proceed in parallel. Expired slots are evicted whenever a new
//! address is inserted, and the map never holds more than `max_entries`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use super::{MarketDataClient, normalize_address};
use crate::error::Result;
use crate::model::TokenPair;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(90);

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

struct CacheEntry {
    fetched_at: Instant,
    pair: Option<TokenPair>,
}

type Slot = Arc<Mutex<Option<CacheEntry>>>;

/// TTL-caching decorator
pub struct CachedMarketClient {
    inner: Arc<dyn MarketDataClient>,
    ttl: Duration,
    max_entries: usize,
    slots: RwLock<HashMap<String, Slot>>,
}

impl CachedMarketClient {
    pub fn new(inner: Arc<dyn MarketDataClient>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            max_entries: DEFAULT_MAX_ENTRIES,
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_default_ttl(inner: Arc<dyn MarketDataClient>) -> Self {
        Self::new(inner, DEFAULT_CACHE_TTL)
    }

    /// Cap the number of cached addresses (at least one)
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Drop expired entries
    pub async fn purge_expired(&self) {
        retain_fresh(&mut *self.slots.write().await, self.ttl);
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    async fn slot(&self, address: &str) -> Slot {
        if let Some(slot) = self.slots.read().await.get(address) {
            return slot.clone();
        }

        let mut slots = self.slots.write().await;
        if !slots.contains_key(address) {
            retain_fresh(&mut slots, self.ttl);
            evict_oldest(&mut slots, self.max_entries - 1);
        }
        slots.entry(address.to_string()).or_default().clone()
    }

    async fn forget(&self, address: &str, slot: &Slot) {
        let mut slots = self.slots.write().await;
        if slots.get(address).is_some_and(|s| Arc::ptr_eq(s, slot)) {
            slots.remove(address);
        }
    }
}

/// Keep slots holding a fresh entry, plus any slot whose lookup is in flight
fn retain_fresh(slots: &mut HashMap<String, Slot>, ttl: Duration) {
    slots.retain(|_, slot| match slot.try_lock() {
        Ok(entry) => entry.as_ref().is_some_and(|e| e.fetched_at.elapsed() < ttl),
        Err(_) => true,
    });
}

/// Evict the oldest settled entries until at most `limit` remain
fn evict_oldest(slots: &mut HashMap<String, Slot>, limit: usize) {
    while slots.len() > limit {
        let oldest = slots
            .iter()
            .filter_map(|(address, slot)| {
                let entry = slot.try_lock().ok()?;
                let fetched_at = entry.as_ref()?.fetched_at;
                Some((address.clone(), fetched_at))
            })
            .min_by_key(|(_, fetched_at)| *fetched_at)
            .map(|(address, _)| address);

        match oldest {
            Some(address) => {
                slots.remove(&address);
            }
            None => break,
        }
    }
}

#[async_trait]
impl MarketDataClient for CachedMarketClient {
    async fn token_info(&self, address: &str) -> Result<Option<TokenPair>> {
        let address = normalize_address(address)?;
        let slot = self.slot(address).await;
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                tracing::debug!(address, "Token cache hit");
                return Ok(cached.pair.clone());
            }
        }

        match self.inner.token_info(address).await {
            Ok(pair) => {
                *entry = Some(CacheEntry {
                    fetched_at: Instant::now(),
                    pair: pair.clone(),
                });
                Ok(pair)
            }
            Err(err) => {
                drop(entry);
                self.forget(address, &slot).await;
                Err(err)
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MockMarketClient;

    fn bonk() -> TokenPair {
        TokenPair::new("Bonk", "BONK", "DezX")
    }

    #[tokio::test]
    async fn test_hits_are_cached() {
        let mock = Arc::new(MockMarketClient::new().with_token("DezX", bonk()));
        let cached = CachedMarketClient::with_default_ttl(mock.clone());

        let first = cached.token_info("DezX").await.unwrap();
        let second = cached.token_info(" DezX ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.calls(), 1);
        assert_eq!(cached.name(), "MockMarket");
    }

    #[tokio::test]
    async fn test_misses_are_cached() {
        let mock = Arc::new(MockMarketClient::new());
        let cached = CachedMarketClient::with_default_ttl(mock.clone());

        assert!(cached.token_info("nope").await.unwrap().is_none());
        assert!(cached.token_info("nope").await.unwrap().is_none());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let mock = Arc::new(MockMarketClient::new().with_token("DezX", bonk()));
        let cached = CachedMarketClient::new(mock.clone(), Duration::ZERO);

        cached.token_info("DezX").await.unwrap();
        cached.token_info("DezX").await.unwrap();
        assert_eq!(mock.calls(), 2);

        cached.purge_expired().await;
        assert_eq!(cached.len().await, 0);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let mock = Arc::new(MockMarketClient::unavailable());
        let cached = CachedMarketClient::with_default_ttl(mock.clone());

        assert!(cached.token_info("DezX").await.is_err());
        assert!(cached.token_info("DezX").await.is_err());
        assert_eq!(mock.calls(), 2);
        assert_eq!(cached.len().await, 0);
    }

    #[tokio::test]
    async fn test_expired_entries_dropped_on_insert() {
        let mock = Arc::new(MockMarketClient::new());
        let cached = CachedMarketClient::new(mock.clone(), Duration::from_millis(30));

        cached.token_info("a").await.unwrap();
        cached.token_info("b").await.unwrap();
        assert_eq!(cached.len().await, 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        cached.token_info("c").await.unwrap();
        assert_eq!(cached.len().await, 1);
    }

    #[tokio::test]
    async fn test_distinct_misses_stay_bounded() {
        let mock = Arc::new(MockMarketClient::new());
        let cached = CachedMarketClient::with_default_ttl(mock.clone()).with_max_entries(100);

        for i in 0..1_000 {
            cached.token_info(&format!("random-{i}")).await.unwrap();
        }
        assert_eq!(cached.len().await, 100);
        assert_eq!(mock.calls(), 1_000);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let mock = Arc::new(MockMarketClient::new());
        let cached = CachedMarketClient::with_default_ttl(mock.clone()).with_max_entries(2);

        for address in ["a", "b", "c"] {
            cached.token_info(address).await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(cached.len().await, 2);

        // "c" is still cached, "a" was evicted
        cached.token_info("c").await.unwrap();
        assert_eq!(mock.calls(), 3);
        cached.token_info("a").await.unwrap();
        assert_eq!(mock.calls(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_fetch() {
        let mock = Arc::new(
            MockMarketClient::new()
                .with_token("DezX", bonk())
                .with_latency(Duration::from_millis(50)),
        );
        let cached = CachedMarketClient::with_default_ttl(mock.clone());

        let (first, second) = tokio::join!(cached.token_info("DezX"), cached.token_info("DezX"));
        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(mock.calls(), 1);
    }
}
