//! DexScreener Client
//!
//! `GET /latest/dex/tokens/{address}` and pick the pair with the deepest
//! USD liquidity.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{MarketDataClient, normalize_address};
use crate::error::{MemeDocError, Result};
use crate::model::TokenPair;

/// DexScreener client configuration
#[derive(Clone, Debug)]
pub struct DexScreenerConfig {
    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com".into(),
            timeout_secs: 10,
        }
    }
}

impl DexScreenerConfig {
    /// Read `DEXSCREENER_BASE_URL` and `DEXSCREENER_TIMEOUT_SECS`; a timeout
    /// that is not a whole number of seconds is a `Config` error
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let base_url = std::env::var("DEXSCREENER_BASE_URL")
            .unwrap_or(defaults.base_url);
        let timeout_secs = match std::env::var("DEXSCREENER_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                MemeDocError::Config(format!("DEXSCREENER_TIMEOUT_SECS must be whole seconds, got {raw:?}"))
            })?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

/// DexScreener market data client
pub struct DexScreenerClient {
    http: reqwest::Client,
    config: DexScreenerConfig,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn tokens_url(&self, address: &str) -> String {
        format!(
            "{}/latest/dex/tokens/{}",
            self.config.base_url.trim_end_matches('/'),
            address
        )
    }
}

#[async_trait]
impl MarketDataClient for DexScreenerClient {
    async fn token_info(&self, address: &str) -> Result<Option<TokenPair>> {
        let address = normalize_address(address)?;
        let url = self.tokens_url(address);

        tracing::debug!(%url, "Fetching DexScreener pairs");
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, address, "DexScreener request failed");
            return Err(MemeDocError::Upstream(format!("DexScreener returned {status}")));
        }

        let body: TokensResponse = resp.json().await?;
        let pair = most_liquid(body.pairs.unwrap_or_default());

        match &pair {
            Some(p) => tracing::info!(address, symbol = %p.base_symbol, liquidity = %p.liquidity_usd, "Resolved token"),
            None => tracing::info!(address, "No pairs listed for token"),
        }

        Ok(pair)
    }

    fn name(&self) -> &str {
        "DexScreener"
    }
}

fn most_liquid(pairs: Vec<RawPair>) -> Option<TokenPair> {
    pairs
        .into_iter()
        .map(TokenPair::from)
        .max_by_key(|p| p.liquidity_usd)
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokensResponse {
    #[serde(default)]
    pairs: Option<Vec<RawPair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPair {
    #[serde(default)]
    chain_id: String,
    #[serde(default)]
    dex_id: String,
    #[serde(default)]
    pair_address: String,
    base_token: RawToken,
    #[serde(default)]
    price_usd: Option<Decimal>,
    #[serde(default)]
    price_change: Option<RawWindow>,
    #[serde(default)]
    liquidity: Option<RawLiquidity>,
    #[serde(default)]
    volume: Option<RawWindow>,
    #[serde(default)]
    pair_created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    #[serde(default)]
    address: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    #[serde(default)]
    h24: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawLiquidity {
    #[serde(default)]
    usd: Option<Decimal>,
}

impl From<RawPair> for TokenPair {
    fn from(raw: RawPair) -> Self {
        Self {
            pair_address: raw.pair_address,
            chain_id: raw.chain_id,
            dex_id: raw.dex_id,
            base_name: raw.base_token.name,
            base_symbol: raw.base_token.symbol,
            base_address: raw.base_token.address,
            price_usd: raw.price_usd,
            price_change_h24: raw.price_change.and_then(|w| w.h24),
            liquidity_usd: raw.liquidity.and_then(|l| l.usd).unwrap_or(Decimal::ZERO),
            volume_h24: raw.volume.and_then(|w| w.h24).unwrap_or(Decimal::ZERO),
            pair_created_at: raw.pair_created_at.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}
