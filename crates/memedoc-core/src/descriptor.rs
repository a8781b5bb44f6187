//! Axis Descriptors
//!
//! Human-readable level text and a green → yellow → red colour for each
//! slider value.

use serde::Serialize;

use crate::risk::RiskInput;

/// Describe a narrative strength (X) value
pub const fn narrative_level(value: u8) -> &'static str {
    match value {
        0..=20 => "Almost no consensus",
        21..=40 => "Some consensus",
        41..=60 => "Strong consensus, regional hotspot",
        61..=80 => "Strong sector-level hotspot",
        _ => "Global top-tier hotspot",
    }
}

/// Describe an influence / shilling consensus (Y) value
pub const fn influence_level(value: u8) -> &'static str {
    match value {
        0..=20 => "Small KOL, small community or individual pick",
        21..=40 => "Mid-size KOL, community or several groups calling it",
        41..=60 => "Top KOL or many callers shilling",
        61..=80 => "Major influencers pushing together",
        _ => "Top-tier entity calling it or a major exchange listing",
    }
}

/// Caption for a price position (Z) value
pub fn price_position_caption(value: u8) -> String {
    format!("{value} (0 = extreme low, 100 = extreme high / bubble zone)")
}

/// Caption for a position size (P) value
pub fn position_size_caption(value: u8) -> String {
    format!("{value}% of total capital")
}

/// Hex colour for a 0-100 value, green at 0, yellow at 50, red at 100
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gradient_color(value: u8) -> String {
    let v = f64::from(value.min(100));
    let (r, g) = if v <= 50.0 {
        ((255.0 * (v / 50.0)) as u8, 200)
    } else {
        (255, (200.0 * (1.0 - (v - 50.0) / 50.0)) as u8)
    };
    format!("#{r:02x}{g:02x}00")
}

/// One slider's value with its description and colour
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AxisReading {
    pub value: u8,
    pub level: String,
    pub color: String,
}

impl AxisReading {
    fn new(value: u8, level: impl Into<String>) -> Self {
        Self {
            value,
            level: level.into(),
            color: gradient_color(value),
        }
    }
}

/// Readings for all four inputs
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AxisReadings {
    pub narrative: AxisReading,
    pub influence: AxisReading,
    pub price_position: AxisReading,
    pub position_size: AxisReading,
}

impl AxisReadings {
    pub fn from_input(input: &RiskInput) -> Self {
        Self {
            narrative: AxisReading::new(input.narrative_strength, narrative_level(input.narrative_strength)),
            influence: AxisReading::new(input.sentiment_amplification, influence_level(input.sentiment_amplification)),
            price_position: AxisReading::new(input.price_position, price_position_caption(input.price_position)),
            position_size: AxisReading::new(input.position_size_pct, position_size_caption(input.position_size_pct)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds_inclusive() {
        assert_eq!(narrative_level(20), "Almost no consensus");
        assert_eq!(narrative_level(21), "Some consensus");
        assert_eq!(narrative_level(80), "Strong sector-level hotspot");
        assert_eq!(narrative_level(81), "Global top-tier hotspot");

        assert_eq!(influence_level(0), "Small KOL, small community or individual pick");
        assert_eq!(influence_level(60), "Top KOL or many callers shilling");
        assert_eq!(influence_level(100), "Top-tier entity calling it or a major exchange listing");
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient_color(0), "#00c800");
        assert_eq!(gradient_color(50), "#ffc800");
        assert_eq!(gradient_color(100), "#ff0000");
    }

    #[test]
    fn test_gradient_truncates() {
        // 255 * 25/50 = 127.5
        assert_eq!(gradient_color(25), "#7fc800");
        // 200 * (1 - 25/50) = 100
        assert_eq!(gradient_color(75), "#ff6400");
        assert_eq!(gradient_color(200), gradient_color(100));
    }

    #[test]
    fn test_readings_from_input() {
        let readings = AxisReadings::from_input(&RiskInput::default());
        assert_eq!(readings.narrative.level, "Strong consensus, regional hotspot");
        assert_eq!(readings.position_size.level, "10% of total capital");
        assert_eq!(readings.price_position.color, "#ffc800");
    }
}
