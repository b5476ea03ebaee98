use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::TeamInvite;

/// Invite joined with the name of the inviting team
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InviteWithTeam {
    #[sqlx(flatten)]
    pub invite: TeamInvite,
    pub team_name: String,
}

pub struct InviteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InviteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, invite_id: Uuid) -> Result<TeamInvite> {
        let invite = sqlx::query_as::<_, TeamInvite>(
            r#"
            SELECT invite_id, team_id, invited_user_id, inviter_id, status, created_at, updated_at
            FROM team_invites
            WHERE invite_id = $1
            "#,
        )
        .bind(invite_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("invite"))?;

        Ok(invite)
    }

    pub async fn list_incoming(&self, user_id: Uuid) -> Result<Vec<InviteWithTeam>> {
        let invites = sqlx::query_as::<_, InviteWithTeam>(
            r#"
            SELECT i.*, t.name AS team_name
            FROM team_invites i
            INNER JOIN teams t ON t.team_id = i.team_id
            WHERE i.invited_user_id = $1 AND i.status = 'pending'
            ORDER BY i.created_at DESC, i.invite_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(invites)
    }

    /// Pending invites sent by teams the user captains
    pub async fn list_outgoing(&self, user_id: Uuid) -> Result<Vec<InviteWithTeam>> {
        let invites = sqlx::query_as::<_, InviteWithTeam>(
            r#"
            SELECT i.*, t.name AS team_name
            FROM team_invites i
            INNER JOIN teams t ON t.team_id = i.team_id
            WHERE t.captain_id = $1 AND i.status = 'pending'
            ORDER BY i.created_at DESC, i.invite_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(invites)
    }
}
