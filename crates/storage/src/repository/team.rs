use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Team, TeamStatus};

/// Repository for Team reads and captain-only updates.
/// Membership changes go through `services::membership`, which owns the locking.
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, team_id: Uuid) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, hackathon_id, name, description, captain_id, status,
                   invite_code, created_at
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("team"))?;

        Ok(team)
    }

    /// The team a user captains in the given hackathon, if any
    pub async fn find_captained(&self, user_id: Uuid, hackathon_id: Uuid) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, hackathon_id, name, description, captain_id, status,
                   invite_code, created_at
            FROM teams
            WHERE captain_id = $1 AND hackathon_id = $2
            "#,
        )
        .bind(user_id)
        .bind(hackathon_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(team)
    }

    /// The team a user belongs to in the given hackathon, as member or captain
    pub async fn find_for_user(&self, user_id: Uuid, hackathon_id: Uuid) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.*
            FROM teams t
            WHERE t.hackathon_id = $2
              AND (
                  t.captain_id = $1
                  OR t.team_id = (SELECT team_id FROM users WHERE user_id = $1)
              )
            ORDER BY (t.captain_id = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(hackathon_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(team)
    }

    pub async fn list_by_hackathon(&self, hackathon_id: Uuid) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, hackathon_id, name, description, captain_id, status,
                   invite_code, created_at
            FROM teams
            WHERE hackathon_id = $1
            ORDER BY created_at, team_id
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn update_status(&self, team_id: Uuid, status: TeamStatus) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET status = $2
            WHERE team_id = $1
            RETURNING team_id, hackathon_id, name, description, captain_id, status,
                      invite_code, created_at
            "#,
        )
        .bind(team_id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("team"))?;

        Ok(team)
    }

    /// Replace the invite code; fails with a unique violation on collision
    pub async fn set_invite_code(&self, team_id: Uuid, code: &str) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET invite_code = $2
            WHERE team_id = $1
            RETURNING team_id, hackathon_id, name, description, captain_id, status,
                      invite_code, created_at
            "#,
        )
        .bind(team_id)
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("team"))?;

        Ok(team)
    }
}
