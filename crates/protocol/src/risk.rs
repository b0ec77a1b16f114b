use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Heart,
    Diabetes,
    Kidney,
    Obesity,
}

impl Disease {
    pub const ALL: [Disease; 4] = [
        Disease::Heart,
        Disease::Diabetes,
        Disease::Kidney,
        Disease::Obesity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Disease::Heart => "heart",
            Disease::Diabetes => "diabetes",
            Disease::Kidney => "kidney",
            Disease::Obesity => "obesity",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    Higher,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::Higher => "higher",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskResult {
    #[serde(rename = "risk_tier")]
    pub tier: RiskTier,
    pub score: u32,
    /// Always empty; kept for wire compatibility with existing clients.
    #[serde(default)]
    pub contributing_habits: Vec<String>,
    #[serde(rename = "improvement_suggestions", default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskResults {
    pub heart: RiskResult,
    pub diabetes: RiskResult,
    pub kidney: RiskResult,
    pub obesity: RiskResult,
}

impl RiskResults {
    pub fn get(&self, disease: Disease) -> &RiskResult {
        match disease {
            Disease::Heart => &self.heart,
            Disease::Diabetes => &self.diabetes,
            Disease::Kidney => &self.kidney,
            Disease::Obesity => &self.obesity,
        }
    }
}
