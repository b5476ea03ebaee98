use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        invite::{CreateInviteRequest, InviteResponse},
        team::TeamResponse,
    },
    models::TeamInvite,
    services::{MembershipService, Notifier},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::features::teams::services::team_response;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/invites",
    request_body = CreateInviteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Invite sent", body = TeamInvite),
        (status = 400, description = "Team closed or full, user already teamed, or invite pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team or user not found")
    ),
    tag = "invites"
)]
pub async fn create_invite(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateInviteRequest>,
) -> Result<Response, WebError> {
    let invite = MembershipService::new(db.pool(), &notifier)
        .invite(auth.user_id, req.team_id, req.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(invite)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/invites/incoming",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending invites addressed to the caller", body = Vec<InviteResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "invites"
)]
pub async fn list_incoming(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let invites = services::list_incoming(db.pool(), auth.user_id).await?;

    Ok(Json(invites).into_response())
}

#[utoipa::path(
    get,
    path = "/api/invites/outgoing",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending invites sent by the caller's teams", body = Vec<InviteResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "invites"
)]
pub async fn list_outgoing(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let invites = services::list_outgoing(db.pool(), auth.user_id).await?;

    Ok(Json(invites).into_response())
}

#[utoipa::path(
    post,
    path = "/api/invites/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Invite id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Invite accepted, caller joined the team", body = TeamResponse),
        (status = 400, description = "Already processed, team closed or full, or caller already teamed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Invite addressed to someone else"),
        (status = 404, description = "Invite not found")
    ),
    tag = "invites"
)]
pub async fn accept_invite(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(invite_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let team = MembershipService::new(db.pool(), &notifier)
        .accept_invite(auth.user_id, invite_id)
        .await?;
    let team = team_response(db.pool(), team, auth.user_id).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    post,
    path = "/api/invites/{id}/decline",
    params(
        ("id" = Uuid, Path, description = "Invite id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Invite declined", body = TeamInvite),
        (status = 400, description = "Already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Invite addressed to someone else"),
        (status = 404, description = "Invite not found")
    ),
    tag = "invites"
)]
pub async fn decline_invite(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(invite_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let invite = MembershipService::new(db.pool(), &notifier)
        .decline_invite(auth.user_id, invite_id)
        .await?;

    Ok(Json(invite).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/invites/{id}",
    params(
        ("id" = Uuid, Path, description = "Invite id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Invite cancelled", body = TeamInvite),
        (status = 400, description = "Already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the inviting captain"),
        (status = 404, description = "Invite not found")
    ),
    tag = "invites"
)]
pub async fn cancel_invite(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(invite_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let invite = MembershipService::new(db.pool(), &notifier)
        .cancel_invite(auth.user_id, invite_id)
        .await?;

    Ok(Json(invite).into_response())
}
