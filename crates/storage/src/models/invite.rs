use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

text_enum!(InviteStatus {
    Pending => "pending",
    Accepted => "accepted",
    Declined => "declined",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamInvite {
    pub invite_id: Uuid,
    pub team_id: Uuid,
    pub invited_user_id: Uuid,
    pub inviter_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: InviteStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
