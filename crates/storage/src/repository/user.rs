use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, telegram_user_id, username, name, bio, role, skills, looking_for,
                   verified_skills, experience, mmr, pts, avatar_url, current_hackathon_id,
                   team_id, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("user"))?;

        Ok(user)
    }

    pub async fn find_many(&self, user_ids: &[Uuid]) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, telegram_user_id, username, name, bio, role, skills, looking_for,
                   verified_skills, experience, mmr, pts, avatar_url, current_hackathon_id,
                   team_id, created_at
            FROM users
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Current roster of a team: the captain first, then members by join order of their accounts
    pub async fn list_team_roster(&self, team_id: Uuid) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.*
            FROM users u
            INNER JOIN teams t ON t.team_id = $1
            WHERE u.team_id = t.team_id OR u.user_id = t.captain_id
            ORDER BY (u.user_id = t.captain_id) DESC, u.created_at, u.user_id
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
