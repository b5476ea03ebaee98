use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

text_enum!(ParticipantStatus {
    Looking => "looking",
    InTeam => "in_team",
});

/// Registration of a user for one hackathon; `in_team` mirrors `users.team_id`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HackathonParticipant {
    pub participant_id: Uuid,
    pub hackathon_id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: ParticipantStatus,
    pub created_at: NaiveDateTime,
}
