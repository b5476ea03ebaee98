use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::user::CandidateResponse};

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/recommendations",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Up to 20 candidates to swipe on", body = Vec<CandidateResponse>),
        (status = 400, description = "Caller not registered for a hackathon"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "recommendations"
)]
pub async fn get_recommendations(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let candidates = services::get_recommendations(db.pool(), auth.user_id).await?;

    Ok(Json(candidates).into_response())
}
