//! Domain Models
//!
//! Token market snapshot and synthetic price series.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!
//! Series prices are chart decoration only and stay `f64`.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The most liquid trading pair for a token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Pair contract address
    pub pair_address: String,

    /// Chain identifier (e.g., "solana")
    pub chain_id: String,

    /// DEX identifier (e.g., "raydium")
    pub dex_id: String,

    /// Base token name
    pub base_name: String,

    /// Base token ticker
    pub base_symbol: String,

    /// Base token contract address
    pub base_address: String,

    /// Current price in USD
    pub price_usd: Option<Decimal>,

    /// 24-hour price change percentage
    pub price_change_h24: Option<Decimal>,

    /// Pool liquidity in USD
    pub liquidity_usd: Decimal,

    /// 24-hour trading volume in USD
    pub volume_h24: Decimal,

    /// When the pair was created
    pub pair_created_at: Option<DateTime<Utc>>,
}

impl TokenPair {
    pub fn new(base_name: impl Into<String>, base_symbol: impl Into<String>, base_address: impl Into<String>) -> Self {
        Self {
            pair_address: String::new(),
            chain_id: "solana".into(),
            dex_id: String::new(),
            base_name: base_name.into(),
            base_symbol: base_symbol.into(),
            base_address: base_address.into(),
            price_usd: None,
            price_change_h24: None,
            liquidity_usd: Decimal::ZERO,
            volume_h24: Decimal::ZERO,
            pair_created_at: None,
        }
    }

    /// Time since the pair was created, if known
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.pair_created_at.map(|created| now - created)
    }

    /// "Name (SYMBOL)"
    pub fn title(&self) -> String {
        format!("{} ({})", self.base_name, self.base_symbol)
    }
}

/// Render an age as "{hours}h {minutes}m"
pub fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// One point on a price chart
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

/// An evenly spaced price series
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,

    /// Spacing between points
    pub interval_minutes: u32,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    /// Non-empty with every price finite and positive
    pub fn is_well_formed(&self) -> bool {
        !self.is_empty() && self.prices().all(|p| p.is_finite() && p > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_age() {
        let now = Utc::now();
        let mut token = TokenPair::new("Bonk", "BONK", "DezX");
        assert!(token.age(now).is_none());

        token.pair_created_at = Some(now - Duration::minutes(185));
        let age = token.age(now).unwrap();
        assert_eq!(format_age(age), "3h 5m");
        assert_eq!(token.title(), "Bonk (BONK)");
    }

    #[test]
    fn test_format_age_negative_is_zero() {
        assert_eq!(format_age(Duration::minutes(-10)), "0h 0m");
    }

    #[test]
    fn test_series_well_formed() {
        assert!(!PriceSeries::default().is_well_formed());

        let now = Utc::now();
        let series = PriceSeries {
            points: vec![
                PricePoint { time: now, price: 0.5 },
                PricePoint { time: now, price: 0.0 },
            ],
            interval_minutes: 2,
        };
        assert!(!series.is_well_formed());
        assert_eq!(series.last_price(), Some(0.0));
    }
}
