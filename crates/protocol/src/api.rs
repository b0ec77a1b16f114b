use serde::{Deserialize, Serialize};

use crate::risk::{RiskResults, RiskTier};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub message: String,
    pub assessment_id: u64,
    pub created_at: String,
    pub risk_results: RiskResults,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub created_at: String,
    pub heart_risk: RiskTier,
    pub diabetes_risk: RiskTier,
    pub kidney_risk: RiskTier,
    pub obesity_risk: RiskTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryResponse {
    pub count: usize,
    pub assessments: Vec<HistoryEntry>,
}

impl HistoryResponse {
    pub fn new(assessments: Vec<HistoryEntry>) -> Self {
        Self {
            count: assessments.len(),
            assessments,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

impl HistoryQuery {
    /// Owner filter to apply; a blank id means every owner.
    pub fn owner(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .filter(|value| !value.is_empty())
    }
}
