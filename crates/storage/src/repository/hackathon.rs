use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::hackathon::CreateHackathonRequest;
use crate::error::{Result, StorageError};
use crate::models::{Hackathon, HackathonParticipant, HackathonStatus};

/// Repository for Hackathon database operations
pub struct HackathonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HackathonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Hackathon>> {
        let hackathons = sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT hackathon_id, name, description, status, team_size, max_teams,
                   starts_at, ends_at, created_at
            FROM hackathons
            ORDER BY starts_at DESC NULLS LAST, created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(hackathons)
    }

    pub async fn find_by_id(&self, hackathon_id: Uuid) -> Result<Hackathon> {
        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT hackathon_id, name, description, status, team_size, max_teams,
                   starts_at, ends_at, created_at
            FROM hackathons
            WHERE hackathon_id = $1
            "#,
        )
        .bind(hackathon_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("hackathon"))?;

        Ok(hackathon)
    }

    pub async fn create(&self, req: &CreateHackathonRequest) -> Result<Hackathon> {
        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            INSERT INTO hackathons (name, description, team_size, max_teams, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING hackathon_id, name, description, status, team_size, max_teams,
                      starts_at, ends_at, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.team_size)
        .bind(req.max_teams)
        .bind(req.starts_at)
        .bind(req.ends_at)
        .fetch_one(self.pool)
        .await?;

        Ok(hackathon)
    }

    pub async fn update_status(
        &self,
        hackathon_id: Uuid,
        status: HackathonStatus,
    ) -> Result<Hackathon> {
        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            UPDATE hackathons
            SET status = $2
            WHERE hackathon_id = $1
            RETURNING hackathon_id, name, description, status, team_size, max_teams,
                      starts_at, ends_at, created_at
            "#,
        )
        .bind(hackathon_id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("hackathon"))?;

        Ok(hackathon)
    }

    pub async fn find_participant(
        &self,
        hackathon_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<HackathonParticipant>> {
        let participant = sqlx::query_as::<_, HackathonParticipant>(
            r#"
            SELECT participant_id, hackathon_id, user_id, status, created_at
            FROM hackathon_participants
            WHERE hackathon_id = $1 AND user_id = $2
            "#,
        )
        .bind(hackathon_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }
}
