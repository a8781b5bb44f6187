//! Score Classification
//!
//! Three bands with a fixed label, advisory message and severity each.
//! Lower bounds are inclusive, so a boundary score lands in the higher band.

use serde::{Deserialize, Serialize};

/// Scores at or above this are at least `Watcher`
pub const WATCHER_THRESHOLD: f64 = 0.38;

/// Scores at or above this are `Prey`
pub const PREY_THRESHOLD: f64 = 0.68;

/// Risk band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Low risk: likely ahead of the crowd
    Hunter,
    /// Neutral: wait and see
    Watcher,
    /// High risk: likely exit liquidity
    Prey,
}

impl RiskBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hunter => "Hunter 🦈",
            Self::Watcher => "Watcher 🧘",
            Self::Prey => "Prey 🐑",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Hunter => "You may be ahead of the crowd, but don't get overconfident.",
            Self::Watcher => "The picture is unclear right now. Let others move first.",
            Self::Prey => "Overheated sentiment plus a heavy position. You are likely to become exit liquidity.",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Hunter => Severity::Info,
            Self::Watcher => Severity::Warning,
            Self::Prey => Severity::Danger,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How prominently a result should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Label, message and severity for a score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub band: RiskBand,
    pub label: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

impl From<RiskBand> for Classification {
    fn from(band: RiskBand) -> Self {
        Self {
            band,
            label: band.label(),
            message: band.message(),
            severity: band.severity(),
        }
    }
}

/// A score with its classification
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskOutput {
    pub score: f64,
    pub classification: Classification,
}

/// Map a score to its band. Total over `f64`; NaN lands in `Prey`.
pub fn classify(score: f64) -> Classification {
    let band = if score < WATCHER_THRESHOLD {
        RiskBand::Hunter
    } else if score < PREY_THRESHOLD {
        RiskBand::Watcher
    } else {
        RiskBand::Prey
    };
    Classification::from(band)
}
