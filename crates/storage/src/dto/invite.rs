use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserSummary;
use crate::models::InviteStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub team_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub invite_id: Uuid,
    pub team_id: Uuid,
    pub team_name: String,
    pub status: InviteStatus,
    pub inviter: UserSummary,
    pub invited_user: UserSummary,
    pub created_at: NaiveDateTime,
}
