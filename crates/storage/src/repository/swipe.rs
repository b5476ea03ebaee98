use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Swipe;

/// Read side of the swipe ledger; inserts happen inside `services::swipes`
pub struct SwipeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SwipeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, swiper_id: Uuid, target_user_id: Uuid) -> Result<Option<Swipe>> {
        let swipe = sqlx::query_as::<_, Swipe>(
            r#"
            SELECT swipe_id, swiper_kind, swiper_id, actor_id, target_user_id, action, created_at
            FROM swipes
            WHERE swiper_id = $1 AND target_user_id = $2
            "#,
        )
        .bind(swiper_id)
        .bind(target_user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(swipe)
    }

    pub async fn count_by_swiper(&self, swiper_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM swipes WHERE swiper_id = $1",
        )
        .bind(swiper_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
