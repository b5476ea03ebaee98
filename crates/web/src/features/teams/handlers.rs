use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        balance::{CandidateCompatibility, TeamBalance},
        common::MessageResponse,
        team::{
            CompatibilityQuery, CreateJoinRequest, CreateTeamRequest, InviteCodeResponse,
            JoinByCodeRequest, JoinRequestResponse, JoinTeamResponse, KickMemberRequest,
            TeamResponse, UpdateTeamStatusRequest,
        },
    },
    models::TeamJoinRequest,
    services::{MembershipService, Notifier},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Teams of the caller's current hackathon", body = Vec<TeamResponse>),
        (status = 400, description = "Caller is not registered for a hackathon"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let teams = services::list_teams(db.pool(), auth.user_id).await?;

    Ok(Json(teams).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Team created, caller is captain", body = TeamResponse),
        (status = 400, description = "Validation error or caller already has a team"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::create_team(db.pool(), &notifier, auth.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(team)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/my",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's team", body = TeamResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Caller has no team")
    ),
    tag = "teams"
)]
pub async fn get_my_team(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let team = services::get_my_team(db.pool(), auth.user_id).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/join",
    request_body = JoinByCodeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Joined the team", body = JoinTeamResponse),
        (status = 400, description = "Team closed, full, or caller already in a team"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown invite code")
    ),
    tag = "teams"
)]
pub async fn join_team(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<JoinByCodeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::join_by_code(db.pool(), &notifier, auth.user_id, &req.code).await?;

    Ok(Json(JoinTeamResponse {
        message: "joined team successfully".to_string(),
        team,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team found", body = TeamResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let team = services::get_team(db.pool(), team_id, auth.user_id).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = UpdateTeamStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status updated", body = TeamResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team_status(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<UpdateTeamStatusRequest>,
) -> Result<Response, WebError> {
    let team = services::update_status(db.pool(), &notifier, auth.user_id, team_id, req.status).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/invite-code",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "New invite code", body = InviteCodeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn regenerate_invite_code(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let team = MembershipService::new(db.pool(), &notifier)
        .regenerate_invite_code(auth.user_id, team_id)
        .await?;

    Ok(Json(InviteCodeResponse {
        team_id: team.team_id,
        code: team.invite_code,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/leave",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Left the team", body = MessageResponse),
        (status = 400, description = "Captain cannot leave, or caller is not a member"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn leave_team(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    MembershipService::new(db.pool(), &notifier)
        .leave(auth.user_id, team_id)
        .await?;

    Ok(Json(MessageResponse::new("left team successfully")).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/kick",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = KickMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 400, description = "Target is not a member or is the captain"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn kick_member(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<KickMemberRequest>,
) -> Result<Response, WebError> {
    MembershipService::new(db.pool(), &notifier)
        .kick(auth.user_id, team_id, req.user_id)
        .await?;

    Ok(Json(MessageResponse::new("member removed")).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/balance",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Composite balance of the roster", body = TeamBalance),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not on the team"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team_balance(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let balance = services::get_team_balance(db.pool(), auth.user_id, team_id).await?;

    Ok(Json(balance).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/candidate-compatibility",
    params(
        ("id" = Uuid, Path, description = "Team id"),
        CompatibilityQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score change if the candidate joined", body = CandidateCompatibility),
        (status = 400, description = "Missing candidateId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not on the team"),
        (status = 404, description = "Team or candidate not found")
    ),
    tag = "teams"
)]
pub async fn get_candidate_compatibility(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
    Query(query): Query<CompatibilityQuery>,
) -> Result<Response, WebError> {
    let compatibility = services::candidate_compatibility(
        db.pool(),
        auth.user_id,
        team_id,
        query.candidate_id,
    )
    .await?;

    Ok(Json(compatibility).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/requests",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = CreateJoinRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Join request sent", body = TeamJoinRequest),
        (status = 400, description = "Team closed or full, caller already teamed, or request pending"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn create_join_request(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<CreateJoinRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let request = MembershipService::new(db.pool(), &notifier)
        .request_to_join(auth.user_id, team_id, req.message)
        .await?;

    Ok((StatusCode::CREATED, Json(request)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/requests",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending join requests", body = Vec<JoinRequestResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn list_team_requests(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let requests = services::list_team_requests(db.pool(), auth.user_id, team_id).await?;

    Ok(Json(requests).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/requests/my",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's join requests", body = Vec<JoinRequestResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams"
)]
pub async fn list_my_requests(
    State(db): State<Database>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let requests = services::list_my_requests(db.pool(), auth.user_id).await?;

    Ok(Json(requests).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/requests/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Join request id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Request accepted, user joined", body = TeamJoinRequest),
        (status = 400, description = "Already processed, team closed or full, or user already teamed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Request not found")
    ),
    tag = "teams"
)]
pub async fn accept_join_request(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(request_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let request = MembershipService::new(db.pool(), &notifier)
        .accept_request(auth.user_id, request_id)
        .await?;

    Ok(Json(request).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/requests/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Join request id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Request rejected", body = TeamJoinRequest),
        (status = 400, description = "Already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Request not found")
    ),
    tag = "teams"
)]
pub async fn reject_join_request(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(request_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let request = MembershipService::new(db.pool(), &notifier)
        .reject_request(auth.user_id, request_id)
        .await?;

    Ok(Json(request).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Join request id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Request cancelled", body = TeamJoinRequest),
        (status = 400, description = "Already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not send this request"),
        (status = 404, description = "Request not found")
    ),
    tag = "teams"
)]
pub async fn cancel_join_request(
    State(db): State<Database>,
    State(notifier): State<Notifier>,
    Extension(auth): Extension<AuthUser>,
    Path(request_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let request = MembershipService::new(db.pool(), &notifier)
        .cancel_request(auth.user_id, request_id)
        .await?;

    Ok(Json(request).into_response())
}
