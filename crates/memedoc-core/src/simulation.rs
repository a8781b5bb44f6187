//! Synthetic Meme Price Series
//!
//! Chart decoration only. Rare large pumps, somewhat more frequent dumps,
//! and small jitter in between. Not a market model.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{PricePoint, PriceSeries};

/// Short chart window (roughly 1-2 hours at 2-minute spacing)
pub const SHORT_WINDOW: usize = 45;

/// Longer chart window (15-minute spacing)
pub const LONG_WINDOW: usize = 90;

/// Prices never drop below this
pub const PRICE_FLOOR: f64 = 1e-9;

/// Series up to this length use 2-minute spacing, longer ones 15 minutes
const FINE_SPACING_MAX_PERIODS: usize = 60;

/// Random-walk generator
#[derive(Clone, Debug)]
pub struct MemeSeriesGenerator {
    /// First price in the series
    pub initial_price: f64,

    /// Probability of a pump step (+40% to +220%)
    pub pump_prob: f64,

    /// Probability of a dump step (-65% to -15%)
    pub dump_prob: f64,
}

impl Default for MemeSeriesGenerator {
    fn default() -> Self {
        Self {
            initial_price: 0.000_42,
            pump_prob: 0.08,
            dump_prob: 0.12,
        }
    }
}

impl MemeSeriesGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate `periods` points ending at `end`
    pub fn generate<R: Rng + ?Sized>(&self, periods: usize, end: DateTime<Utc>, rng: &mut R) -> PriceSeries {
        let interval_minutes: u32 = if periods <= FINE_SPACING_MAX_PERIODS { 2 } else { 15 };
        if periods == 0 {
            return PriceSeries {
                points: Vec::new(),
                interval_minutes,
            };
        }

        let mut prices = Vec::with_capacity(periods);
        prices.push(self.initial_price.max(PRICE_FLOOR));

        for _ in 1..periods {
            let change = self.step(rng);
            let prev = prices[prices.len() - 1];
            prices.push((prev * (1.0 + change)).max(PRICE_FLOOR));
        }

        let step = Duration::minutes(i64::from(interval_minutes));
        let start = end - step * (i32::try_from(periods - 1).unwrap_or(i32::MAX));
        let points = prices
            .into_iter()
            .scan(start, |time, price| {
                let point = PricePoint { time: *time, price };
                *time += step;
                Some(point)
            })
            .collect();

        PriceSeries {
            points,
            interval_minutes,
        }
    }

    /// Reproducible series from a seed
    pub fn generate_seeded(&self, periods: usize, end: DateTime<Utc>, seed: u64) -> PriceSeries {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(periods, end, &mut rng)
    }

    /// Series from the thread-local RNG
    pub fn generate_random(&self, periods: usize, end: DateTime<Utc>) -> PriceSeries {
        self.generate(periods, end, &mut rand::rng())
    }

    fn step<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let r: f64 = rng.random();
        if r < self.pump_prob {
            rng.random_range(0.4..2.2)
        } else if r < self.pump_prob + self.dump_prob {
            rng.random_range(-0.65..-0.15)
        } else {
            rng.random_range(-0.12..0.15)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_window_spacing() {
        let end = Utc::now();
        let series = MemeSeriesGenerator::new().generate_seeded(SHORT_WINDOW, end, 7);

        assert_eq!(series.len(), SHORT_WINDOW);
        assert_eq!(series.interval_minutes, 2);
        assert_eq!(series.points.last().unwrap().time, end);
        assert_eq!(series.points[0].time, end - Duration::minutes(88));
        assert!((series.points[0].price - 0.000_42).abs() < f64::EPSILON);
    }

    #[test]
    fn test_long_window_spacing() {
        let end = Utc::now();
        let series = MemeSeriesGenerator::new().generate_seeded(LONG_WINDOW, end, 7);

        assert_eq!(series.interval_minutes, 15);
        assert_eq!(series.points[1].time - series.points[0].time, Duration::minutes(15));
    }

    #[test]
    fn test_prices_finite_and_positive() {
        let generator = MemeSeriesGenerator::new();
        for seed in 0..50 {
            let series = generator.generate_seeded(200, Utc::now(), seed);
            assert!(series.is_well_formed());
            assert!(series.prices().all(|p| p >= PRICE_FLOOR));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let end = Utc::now();
        let generator = MemeSeriesGenerator::new();
        assert_eq!(generator.generate_seeded(30, end, 42), generator.generate_seeded(30, end, 42));
    }

    #[test]
    fn test_step_changes_stay_in_ranges() {
        let generator = MemeSeriesGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let change = generator.step(&mut rng);
            assert!((-0.65..2.2).contains(&change));
        }
    }

    #[test]
    fn test_zero_periods_empty() {
        let series = MemeSeriesGenerator::new().generate_random(0, Utc::now());
        assert!(series.is_empty());
    }

    #[test]
    fn test_constant_dump_hits_floor() {
        let generator = MemeSeriesGenerator {
            initial_price: 1e-8,
            pump_prob: 0.0,
            dump_prob: 1.0,
        };
        let series = generator.generate_seeded(100, Utc::now(), 3);
        assert!((series.last_price().unwrap() - PRICE_FLOOR).abs() < 1e-15);
    }
}
