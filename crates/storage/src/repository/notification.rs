use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Notification;
use crate::services::notifications::NotificationEvent;

pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, event: &NotificationEvent) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, kind, title, message, data)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING notification_id, user_id, kind, title, message, data, is_read, created_at
            "#,
        )
        .bind(event.user_id)
        .bind(event.kind.as_str())
        .bind(&event.title)
        .bind(&event.message)
        .bind(sqlx::types::Json(&event.data))
        .fetch_one(self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn list_for_user(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT notification_id, user_id, kind, title, message, data, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, notification_id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Only the owner can mark a notification as read
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_id = $1 AND user_id = $2
            RETURNING notification_id, user_id, kind, title, message, data, is_read, created_at
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("notification"))?;

        Ok(notification)
    }
}
