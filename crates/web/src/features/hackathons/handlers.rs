use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::hackathon::{CreateHackathonRequest, RegistrationResponse, UpdateHackathonStatusRequest},
    models::Hackathon,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All hackathons", body = Vec<Hackathon>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "hackathons"
)]
pub async fn list_hackathons(State(db): State<Database>) -> Result<Response, WebError> {
    let hackathons = services::list_hackathons(db.pool()).await?;

    Ok(Json(hackathons).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Hackathon found", body = Hackathon),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn get_hackathon(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let hackathon = services::get_hackathon(db.pool(), hackathon_id).await?;

    Ok(Json(hackathon).into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons",
    request_body = CreateHackathonRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Hackathon created", body = Hackathon),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "hackathons"
)]
pub async fn create_hackathon(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateHackathonRequest>,
) -> Result<Response, WebError> {
    auth.require_admin()?;
    req.validate()?;

    let hackathon = services::create_hackathon(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(hackathon)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/hackathons/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    request_body = UpdateHackathonStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status updated", body = Hackathon),
        (status = 400, description = "Transition not allowed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn update_hackathon_status(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(hackathon_id): Path<Uuid>,
    Json(req): Json<UpdateHackathonStatusRequest>,
) -> Result<Response, WebError> {
    auth.require_admin()?;

    let hackathon = services::update_status(db.pool(), hackathon_id, req.status).await?;

    Ok(Json(hackathon).into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons/{id}/register",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Registered", body = RegistrationResponse),
        (status = 400, description = "Registration closed or already registered"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn register(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(hackathon_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let participant = services::register(db.pool(), auth.user_id, hackathon_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "registered successfully".to_string(),
            participant,
        }),
    )
        .into_response())
}
