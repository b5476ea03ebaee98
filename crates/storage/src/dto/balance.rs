use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserSummary;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MmrStats {
    pub average: f64,
    pub min: i32,
    pub max: i32,
    pub spread: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Mmr,
    Role,
    Team,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSuggestion {
    pub kind: SuggestionKind,
    pub message: String,
}

/// Composite quality of a team's composition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamBalance {
    /// 0..=100
    pub score: f64,
    pub mmr_stats: MmrStats,
    pub skill_coverage: BTreeMap<String, usize>,
    pub role_coverage: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<BalanceSuggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Recommended,
    Neutral,
    NotRecommended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCompatibility {
    pub candidate: UserSummary,
    pub current_balance: f64,
    pub new_balance: f64,
    pub score_diff: f64,
    pub recommendation: Recommendation,
    pub new_skills_covered: usize,
    pub new_roles_covered: usize,
}
