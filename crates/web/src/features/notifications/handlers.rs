use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{PaginatedResponse, PaginationParams},
    models::Notification,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's notifications, newest first", body = PaginatedResponse<Notification>),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (notifications, total) =
        services::list_notifications(db.pool(), auth.user_id, &pagination).await?;

    let response = PaginatedResponse::new(
        notifications,
        pagination.page,
        pagination.page_size,
        total,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Marked as read", body = Notification),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn mark_read(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(notification_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let notification = services::mark_read(db.pool(), auth.user_id, notification_id).await?;

    Ok(Json(notification).into_response())
}
