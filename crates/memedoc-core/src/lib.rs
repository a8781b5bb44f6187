//! # memedoc-core
//!
//! Sentiment self-diagnosis for meme tokens: a deterministic risk score
//! derived from three subjective ratings and the user's position size.
//!
//! ## Risk Composition
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  score = clamp(0.01, 0.99, weighted sum)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Y sentiment amplification  ███████████████  35%            │
//! │  Z price position           ████████████     28%            │
//! │  P position size            █████████        22%            │
//! │  1-X narrative weakness     ██████           15%            │
//! └─────────────────────────────────────────────────────────────┘
//!
//!   score < 0.38          → Hunter   (info)
//!   0.38 ≤ score < 0.68   → Watcher  (warning)
//!   score ≥ 0.68          → Prey     (danger)
//! ```
//!
//! The scorer is pure. Market lookup, synthetic charts and caching live in
//! the surrounding modules and never feed back into the score.

pub mod risk;
pub mod descriptor;
pub mod market;
pub mod simulation;
pub mod model;
pub mod report;
pub mod error;

pub use error::{MemeDocError, Result};
pub use model::{PricePoint, PriceSeries, TokenPair};
pub use report::{DiagnosisReport, DiagnosisRequest, diagnose};
pub use risk::{Classification, RiskBand, RiskInput, RiskOutput, ScoreBreakdown, Severity, classify, compute_score};

/// Shown alongside every report
pub const DISCLAIMER: &str = "For entertainment and self-reflection only. Not investment advice. Meme markets are extremely high risk.";
