use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

text_enum!(UserRole {
    User => "user",
    HackathonCreator => "hackathon_creator",
    Admin => "admin",
});

/// Profile as owned by the identity side; `team_id` only changes through team operations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Uuid,
    pub telegram_user_id: Option<i64>,
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub skills: Vec<String>,
    pub looking_for: Vec<String>,
    pub verified_skills: Vec<String>,
    pub experience: Option<String>,
    pub mmr: i32,
    pub pts: i32,
    pub avatar_url: Option<String>,
    pub current_hackathon_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
