//! Risk Scoring
//!
//! Pure functions mapping the four self-reported inputs to a bounded score
//! and a three-way band.

mod scorer;
mod classify;

pub use scorer::{
    RiskInput, ScoreBreakdown, compute_score,
    NARRATIVE_WEAKNESS_WEIGHT, POSITION_SIZE_WEIGHT, PRICE_POSITION_WEIGHT, SENTIMENT_WEIGHT,
    SCORE_CEILING, SCORE_FLOOR,
};
pub use classify::{
    Classification, RiskBand, RiskOutput, Severity, classify,
    PREY_THRESHOLD, WATCHER_THRESHOLD,
};
