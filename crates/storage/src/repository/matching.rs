use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Match;

pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Matches the user took part in: as the liked user, as the acting user,
    /// or as captain of the team credited with the like
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Match>> {
        let matches = sqlx::query_as::<_, Match>(
            r#"
            SELECT m.match_id, m.swiper_kind, m.swiper_id, m.initiator_id, m.user_id, m.created_at
            FROM matches m
            WHERE m.user_id = $1
               OR m.initiator_id = $1
               OR (
                   m.swiper_kind = 'team'
                   AND EXISTS (
                       SELECT 1 FROM teams t
                       WHERE t.team_id = m.swiper_id AND t.captain_id = $1
                   )
               )
            ORDER BY m.created_at DESC, m.match_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(matches)
    }

    pub async fn count_between(&self, first: Uuid, second: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM matches
            WHERE LEAST(initiator_id, user_id) = LEAST($1::uuid, $2::uuid)
              AND GREATEST(initiator_id, user_id) = GREATEST($1::uuid, $2::uuid)
            "#,
        )
        .bind(first)
        .bind(second)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
