use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams, error::Result, models::Notification,
    repository::NotificationRepository,
};
use uuid::Uuid;

pub async fn list_notifications(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &PaginationParams,
) -> Result<(Vec<Notification>, i64)> {
    let repo = NotificationRepository::new(pool);

    let total = repo.count_for_user(user_id).await?;
    let notifications = repo
        .list_for_user(user_id, pagination.limit() as i64, pagination.offset() as i64)
        .await?;

    Ok((notifications, total))
}

pub async fn mark_read(pool: &PgPool, user_id: Uuid, notification_id: Uuid) -> Result<Notification> {
    let repo = NotificationRepository::new(pool);
    repo.mark_read(notification_id, user_id).await
}
