//! Risk Scorer
//!
//! Weighted linear combination of the normalized inputs, clamped so the
//! result never reads as certainty in either direction.

use serde::{Deserialize, Serialize};

use super::classify::{RiskOutput, classify};
use crate::error::{MemeDocError, Result};

/// Hype/FOMO amplification carries the most weight
pub const SENTIMENT_WEIGHT: f64 = 0.35;

/// Where the price sits in its recent range
pub const PRICE_POSITION_WEIGHT: f64 = 0.28;

/// Share of total capital committed
pub const POSITION_SIZE_WEIGHT: f64 = 0.22;

/// Applied to `1 - narrative`, so a weak story raises risk
pub const NARRATIVE_WEAKNESS_WEIGHT: f64 = 0.15;

pub const SCORE_FLOOR: f64 = 0.01;
pub const SCORE_CEILING: f64 = 0.99;

const MAX_INPUT: u8 = 100;

/// The four slider values feeding the scorer, each in `[0, 100]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInput {
    /// X: strength of the token's public story (inverse to risk)
    pub narrative_strength: u8,

    /// Y: degree of hype/FOMO amplification
    pub sentiment_amplification: u8,

    /// Z: current price within its recent range (0 = low, 100 = bubble)
    pub price_position: u8,

    /// P: percentage of total capital in this token
    pub position_size_pct: u8,
}

impl Default for RiskInput {
    fn default() -> Self {
        Self {
            narrative_strength: 50,
            sentiment_amplification: 50,
            price_position: 50,
            position_size_pct: 10,
        }
    }
}

impl RiskInput {
    /// Checked constructor; rejects any value above 100
    pub fn new(
        narrative_strength: u8,
        sentiment_amplification: u8,
        price_position: u8,
        position_size_pct: u8,
    ) -> Result<Self> {
        let input = Self {
            narrative_strength,
            sentiment_amplification,
            price_position,
            position_size_pct,
        };
        input.validate()?;
        Ok(input)
    }

    /// Checked constructor for untrusted wire values of any integer size
    pub fn from_raw(
        narrative_strength: i64,
        sentiment_amplification: i64,
        price_position: i64,
        position_size_pct: i64,
    ) -> Result<Self> {
        Ok(Self {
            narrative_strength: checked_field("narrative_strength", narrative_strength)?,
            sentiment_amplification: checked_field("sentiment_amplification", sentiment_amplification)?,
            price_position: checked_field("price_position", price_position)?,
            position_size_pct: checked_field("position_size_pct", position_size_pct)?,
        })
    }

    /// Check every field lies in `[0, 100]`
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("narrative_strength", self.narrative_strength),
            ("sentiment_amplification", self.sentiment_amplification),
            ("price_position", self.price_position),
            ("position_size_pct", self.position_size_pct),
        ];

        for (field, value) in fields {
            checked_field(field, i64::from(value))?;
        }
        Ok(())
    }

    pub fn score(&self) -> f64 {
        compute_score(
            self.narrative_strength,
            self.sentiment_amplification,
            self.price_position,
            self.position_size_pct,
        )
    }

    /// Score plus band
    pub fn assess(&self) -> RiskOutput {
        let score = self.score();
        RiskOutput {
            score,
            classification: classify(score),
        }
    }

    /// Per-factor contributions to the unclamped score
    pub fn breakdown(&self) -> ScoreBreakdown {
        let sentiment = normalize(self.sentiment_amplification) * SENTIMENT_WEIGHT;
        let price_position = normalize(self.price_position) * PRICE_POSITION_WEIGHT;
        let position_size = normalize(self.position_size_pct) * POSITION_SIZE_WEIGHT;
        let narrative_weakness = (1.0 - normalize(self.narrative_strength)) * NARRATIVE_WEAKNESS_WEIGHT;

        ScoreBreakdown {
            sentiment,
            price_position,
            position_size,
            narrative_weakness,
            raw: sentiment + price_position + position_size + narrative_weakness,
        }
    }
}

/// Weighted contributions behind a score
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sentiment: f64,
    pub price_position: f64,
    pub position_size: f64,
    pub narrative_weakness: f64,

    /// Sum before clamping
    pub raw: f64,
}

/// Compute the risk score for the four raw slider values.
///
/// Inputs are expected in `[0, 100]`; this function does not validate them
/// (use [`RiskInput::new`] for that). The result is always within
/// `[SCORE_FLOOR, SCORE_CEILING]`.
pub fn compute_score(
    narrative_strength: u8,
    sentiment_amplification: u8,
    price_position: u8,
    position_size_pct: u8,
) -> f64 {
    let x = normalize(narrative_strength);
    let y = normalize(sentiment_amplification);
    let z = normalize(price_position);
    let p = normalize(position_size_pct);

    let raw = y * SENTIMENT_WEIGHT
        + z * PRICE_POSITION_WEIGHT
        + p * POSITION_SIZE_WEIGHT
        + (1.0 - x) * NARRATIVE_WEAKNESS_WEIGHT;

    raw.clamp(SCORE_FLOOR, SCORE_CEILING)
}

fn checked_field(field: &'static str, value: i64) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_INPUT)
        .ok_or(MemeDocError::InputOutOfRange { field, value })
}

fn normalize(value: u8) -> f64 {
    f64::from(value) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskBand;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_weights_sum_to_one() {
        let total = SENTIMENT_WEIGHT + PRICE_POSITION_WEIGHT + POSITION_SIZE_WEIGHT + NARRATIVE_WEAKNESS_WEIGHT;
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_extremes_are_clamped() {
        assert!((compute_score(0, 100, 100, 100) - SCORE_CEILING).abs() < EPS);
        assert!((compute_score(100, 0, 0, 0) - SCORE_FLOOR).abs() < EPS);
    }

    #[test]
    fn test_reference_scenario() {
        // 0.175 + 0.14 + 0.022 + 0.075
        let score = compute_score(50, 50, 50, 10);
        assert!((score - 0.412).abs() < EPS);
        assert_eq!(RiskInput::default().assess().classification.band, RiskBand::Watcher);
    }

    #[test]
    fn test_idempotent() {
        let input = RiskInput::new(12, 88, 73, 40).unwrap();
        assert_eq!(input.score().to_bits(), input.score().to_bits());
    }

    #[test]
    fn test_breakdown_matches_score() {
        let input = RiskInput::new(30, 70, 60, 25).unwrap();
        let b = input.breakdown();

        assert!((b.sentiment - 0.245).abs() < EPS);
        assert!((b.price_position - 0.168).abs() < EPS);
        assert!((b.position_size - 0.055).abs() < EPS);
        assert!((b.narrative_weakness - 0.105).abs() < EPS);
        assert!((b.raw - input.score()).abs() < EPS);
    }

    #[test]
    fn test_breakdown_raw_is_unclamped() {
        let input = RiskInput::new(100, 0, 0, 0).unwrap();
        assert!(input.breakdown().raw.abs() < EPS);
        assert!((input.score() - SCORE_FLOOR).abs() < EPS);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let err = RiskInput::new(50, 50, 101, 10).unwrap_err();
        assert!(matches!(
            err,
            MemeDocError::InputOutOfRange { field: "price_position", value: 101 }
        ));
        assert!(RiskInput::new(100, 100, 100, 100).is_ok());
    }

    #[test]
    fn test_from_raw_bounds() {
        let input = RiskInput::from_raw(0, 100, 50, 10).unwrap();
        assert_eq!(input.sentiment_amplification, 100);

        for (raw, field) in [(300, "sentiment_amplification"), (-1, "sentiment_amplification")] {
            let err = RiskInput::from_raw(50, raw, 50, 10).unwrap_err();
            assert!(matches!(err, MemeDocError::InputOutOfRange { field: f, value } if f == field && value == raw));
        }

        let err = RiskInput::from_raw(50, 50, 50, i64::MAX).unwrap_err();
        assert!(matches!(err, MemeDocError::InputOutOfRange { field: "position_size_pct", .. }));
    }

    #[test]
    fn test_unvalidated_input_still_bounded() {
        let score = compute_score(0, 255, 255, 255);
        assert!((score - SCORE_CEILING).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_score_bounded(x in 0u8..=100, y in 0u8..=100, z in 0u8..=100, p in 0u8..=100) {
            let score = compute_score(x, y, z, p);
            prop_assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&score));
        }

        #[test]
        fn prop_monotone_in_risk_drivers(x in 0u8..=100, y in 0u8..99, z in 0u8..99, p in 0u8..99) {
            let base = compute_score(x, y, z, p);
            prop_assert!(compute_score(x, y + 1, z, p) >= base);
            prop_assert!(compute_score(x, y, z + 1, p) >= base);
            prop_assert!(compute_score(x, y, z, p + 1) >= base);
        }

        #[test]
        fn prop_non_increasing_in_narrative(x in 0u8..100, y in 0u8..=100, z in 0u8..=100, p in 0u8..=100) {
            prop_assert!(compute_score(x + 1, y, z, p) <= compute_score(x, y, z, p));
        }
    }
}
