use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::swipe::MatchResponse};

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's matches", body = Vec<MatchResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let matches = services::list_matches(db.pool(), auth.user_id).await?;

    Ok(Json(matches).into_response())
}
