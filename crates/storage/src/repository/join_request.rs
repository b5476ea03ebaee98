use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::TeamJoinRequest;

/// Join request joined with the name of the team it targets
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JoinRequestWithTeam {
    #[sqlx(flatten)]
    pub request: TeamJoinRequest,
    pub team_name: String,
}

pub struct JoinRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JoinRequestRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, request_id: Uuid) -> Result<TeamJoinRequest> {
        let request = sqlx::query_as::<_, TeamJoinRequest>(
            r#"
            SELECT request_id, team_id, user_id, message, status, created_at, updated_at
            FROM team_join_requests
            WHERE request_id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("join request"))?;

        Ok(request)
    }

    pub async fn list_pending_for_team(&self, team_id: Uuid) -> Result<Vec<JoinRequestWithTeam>> {
        let requests = sqlx::query_as::<_, JoinRequestWithTeam>(
            r#"
            SELECT r.*, t.name AS team_name
            FROM team_join_requests r
            INNER JOIN teams t ON t.team_id = r.team_id
            WHERE r.team_id = $1 AND r.status = 'pending'
            ORDER BY r.created_at, r.request_id
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<JoinRequestWithTeam>> {
        let requests = sqlx::query_as::<_, JoinRequestWithTeam>(
            r#"
            SELECT r.*, t.name AS team_name
            FROM team_join_requests r
            INNER JOIN teams t ON t.team_id = r.team_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC, r.request_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }
}
