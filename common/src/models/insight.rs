use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory text for one risky address, as returned by the generation capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "ip")]
    pub address: String,
    pub summary: String,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

/// Result of an insight request.
///
/// `Generated` with an empty list means there was nothing to analyze,
/// `Unavailable` means the capability failed and was swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    Generated(Vec<Insight>),
    Unavailable,
}

impl InsightOutcome {
    pub fn into_insights(self) -> Vec<Insight> {
        match self {
            InsightOutcome::Generated(insights) => insights,
            InsightOutcome::Unavailable => Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, InsightOutcome::Unavailable)
    }
}
