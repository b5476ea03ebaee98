use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::swipe::{SwipePreferenceRequest, SwipeRequest, SwipeResponse},
    models::SwipePreference,
    services::Notifier,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/swipe",
    request_body = SwipeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Swipe recorded", body = SwipeResponse),
        (status = 400, description = "Invalid action, already swiped, or caller not registered"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Target user not found")
    ),
    tag = "swipes"
)]
pub async fn swipe(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<SwipeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let action = req.action().map_err(WebError::BadRequest)?;

    let response =
        services::swipe(db.pool(), &notifier, auth.user_id, req.target_user_id, action).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/swipe/preferences",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's swipe filters", body = SwipePreference),
        (status = 400, description = "Caller not registered for a hackathon"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "swipes"
)]
pub async fn get_preferences(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let preference = services::get_preferences(db.pool(), auth.user_id).await?;

    Ok(Json(preference).into_response())
}

#[utoipa::path(
    put,
    path = "/api/swipe/preferences",
    request_body = SwipePreferenceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Filters saved", body = SwipePreference),
        (status = 400, description = "Validation error or caller not registered"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "swipes"
)]
pub async fn update_preferences(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<SwipePreferenceRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let preference = services::update_preferences(db.pool(), auth.user_id, &req).await?;

    Ok(Json(preference).into_response())
}
