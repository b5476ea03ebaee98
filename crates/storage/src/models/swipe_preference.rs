use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Candidate filter for one user in one hackathon. Lists are any-of, filters are all-of.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwipePreference {
    pub user_id: Uuid,
    pub hackathon_id: Uuid,
    pub min_mmr: Option<i32>,
    pub max_mmr: Option<i32>,
    pub preferred_skills: Vec<String>,
    pub preferred_experience: Vec<String>,
    pub preferred_roles: Vec<String>,
    pub verified_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}
