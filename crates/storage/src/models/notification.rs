use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

text_enum!(NotificationKind {
    Match => "match",
    TeamInvite => "team_invite",
    TeamRequest => "team_request",
    TeamAccepted => "team_accepted",
    TeamRejected => "team_rejected",
});

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: sqlx::types::Json<serde_json::Value>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}
