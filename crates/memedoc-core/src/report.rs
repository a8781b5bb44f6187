//! Diagnosis Report
//!
//! Everything the shell collects goes in as a `DiagnosisRequest`; a
//! self-contained `DiagnosisReport` comes out. No state survives the call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::DISCLAIMER;
use crate::descriptor::AxisReadings;
use crate::model::{TokenPair, format_age};
use crate::risk::{RiskInput, RiskOutput, ScoreBreakdown};

/// Inputs for one diagnosis
#[derive(Clone, Debug, Default)]
pub struct DiagnosisRequest {
    pub input: RiskInput,

    /// Free-form trading plan / stop-loss notes
    pub notes: Option<String>,

    /// Token the user looked up, if any
    pub token: Option<TokenPair>,
}

/// Result of a diagnosis
#[derive(Clone, Debug, Serialize)]
pub struct DiagnosisReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub input: RiskInput,
    pub output: RiskOutput,
    pub breakdown: ScoreBreakdown,
    pub axes: AxisReadings,
    pub token: Option<TokenPair>,
    pub notes: Option<String>,
}

/// Score and classify a request
pub fn diagnose(request: DiagnosisRequest) -> DiagnosisReport {
    let DiagnosisRequest { input, notes, token } = request;
    let output = input.assess();

    tracing::debug!(
        score = output.score,
        band = ?output.classification.band,
        "Diagnosis complete"
    );

    DiagnosisReport {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        input,
        output,
        breakdown: input.breakdown(),
        axes: AxisReadings::from_input(&input),
        token,
        notes: notes.filter(|n| !n.trim().is_empty()),
    }
}

impl DiagnosisReport {
    /// Plain-text rendering of the report, served for `Accept: text/plain`
    pub fn render_text(&self) -> String {
        let mut out = String::from("MemeDoc Diagnosis\n");
        out.push_str("═".repeat(50).as_str());
        out.push('\n');

        if let Some(token) = &self.token {
            let price = token
                .price_usd
                .map_or_else(|| "—".to_string(), |p| format!("${p:.8}"));
            let change = token
                .price_change_h24
                .map_or_else(|| "—".to_string(), |c| format!("{c}%"));

            out.push_str(&format!("\n{}\n", token.title()));
            out.push_str(&format!("  Price:       {price}\n"));
            out.push_str(&format!("  24h Change:  {change}\n"));
            out.push_str(&format!("  Liquidity:   ${}\n", group_thousands(token.liquidity_usd)));
            out.push_str(&format!("  24h Volume:  ${}\n", group_thousands(token.volume_h24)));
            if let Some(age) = token.age(self.generated_at) {
                out.push_str(&format!("  Pair Age:    {}\n", format_age(age)));
            }
        }

        let class = &self.output.classification;
        out.push_str(&format!("\n{}\n  {}\n", class.label, class.message));
        out.push_str(&format!(
            "  Risk Score:  {:.2} ({})\n",
            self.output.score,
            class.severity.as_str()
        ));

        let b = &self.breakdown;
        out.push_str("\nScore Composition\n");
        out.push_str(&format!("  Sentiment amplification (Y): {:.2}\n", b.sentiment));
        out.push_str(&format!("  Price position (Z):          {:.2}\n", b.price_position));
        out.push_str(&format!("  Position size (P):           {:.2}\n", b.position_size));
        out.push_str(&format!("  Narrative weakness (1-X):    {:.2}\n", b.narrative_weakness));

        if let Some(notes) = &self.notes {
            out.push_str(&format!("\nNotes\n  {notes}\n"));
        }

        out.push('\n');
        out.push_str(DISCLAIMER);
        out
    }
}

/// Whole-dollar amount with thousands separators
fn group_thousands(value: Decimal) -> String {
    let whole = value.trunc().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value.is_sign_negative() && !value.trunc().is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}
