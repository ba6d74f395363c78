//! Risk threshold
//!
//! Maps the default probability (percent) to a binary label.

use serde::{Deserialize, Serialize};

/// Cutoff in percent. Probabilities at or above it are high risk.
pub const THRESHOLD_PERCENT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    HighRisk,
    Safe,
}

impl RiskLabel {
    pub fn from_probability(probability_percent: f64) -> Self {
        if probability_percent >= THRESHOLD_PERCENT {
            RiskLabel::HighRisk
        } else {
            RiskLabel::Safe
        }
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self, RiskLabel::HighRisk)
    }

    /// Human readable verdict shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::HighRisk => "⚠️ High risk of default",
            RiskLabel::Safe => "✅ Safe — on-time payment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_high_risk() {
        assert_eq!(RiskLabel::from_probability(40.0), RiskLabel::HighRisk);
        assert_eq!(RiskLabel::from_probability(39.999), RiskLabel::Safe);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(RiskLabel::from_probability(0.0), RiskLabel::Safe);
        assert_eq!(RiskLabel::from_probability(100.0), RiskLabel::HighRisk);
    }

    #[test]
    fn test_messages_differ() {
        assert!(RiskLabel::HighRisk.message().contains("High risk of default"));
        assert!(RiskLabel::Safe.message().contains("on-time payment"));
    }
}
