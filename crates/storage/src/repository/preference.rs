use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::swipe::SwipePreferenceRequest;
use crate::error::Result;
use crate::models::SwipePreference;

pub struct PreferenceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PreferenceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, user_id: Uuid, hackathon_id: Uuid) -> Result<Option<SwipePreference>> {
        let preference = sqlx::query_as::<_, SwipePreference>(
            r#"
            SELECT user_id, hackathon_id, min_mmr, max_mmr, preferred_skills,
                   preferred_experience, preferred_roles, verified_only, updated_at
            FROM swipe_preferences
            WHERE user_id = $1 AND hackathon_id = $2
            "#,
        )
        .bind(user_id)
        .bind(hackathon_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(preference)
    }

    pub async fn upsert(
        &self,
        user_id: Uuid,
        hackathon_id: Uuid,
        req: &SwipePreferenceRequest,
    ) -> Result<SwipePreference> {
        let preference = sqlx::query_as::<_, SwipePreference>(
            r#"
            INSERT INTO swipe_preferences (
                user_id, hackathon_id, min_mmr, max_mmr, preferred_skills,
                preferred_experience, preferred_roles, verified_only
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, hackathon_id) DO UPDATE
            SET min_mmr = EXCLUDED.min_mmr,
                max_mmr = EXCLUDED.max_mmr,
                preferred_skills = EXCLUDED.preferred_skills,
                preferred_experience = EXCLUDED.preferred_experience,
                preferred_roles = EXCLUDED.preferred_roles,
                verified_only = EXCLUDED.verified_only,
                updated_at = NOW()
            RETURNING user_id, hackathon_id, min_mmr, max_mmr, preferred_skills,
                      preferred_experience, preferred_roles, verified_only, updated_at
            "#,
        )
        .bind(user_id)
        .bind(hackathon_id)
        .bind(req.min_mmr)
        .bind(req.max_mmr)
        .bind(&req.preferred_skills)
        .bind(&req.preferred_experience)
        .bind(&req.preferred_roles)
        .bind(req.verified_only)
        .fetch_one(self.pool)
        .await?;

        Ok(preference)
    }
}
