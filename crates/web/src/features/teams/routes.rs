use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    accept_join_request, cancel_join_request, create_join_request, create_team,
    get_candidate_compatibility, get_my_team, get_team, get_team_balance, join_team, kick_member,
    leave_team, list_my_requests, list_team_requests, list_teams, regenerate_invite_code,
    reject_join_request, update_team_status,
};
use crate::middleware::auth::{JwtKeys, require_auth};
use crate::state::AppState;

pub fn routes(jwt: JwtKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/my", get(get_my_team))
        .route("/join", post(join_team))
        .route("/requests/my", get(list_my_requests))
        .route("/requests/:id/accept", post(accept_join_request))
        .route("/requests/:id/reject", post(reject_join_request))
        .route("/requests/:id", delete(cancel_join_request))
        .route("/:id", get(get_team))
        .route("/:id/status", put(update_team_status))
        .route("/:id/invite-code", post(regenerate_invite_code))
        .route("/:id/leave", post(leave_team))
        .route("/:id/kick", post(kick_member))
        .route("/:id/balance", get(get_team_balance))
        .route("/:id/candidate-compatibility", get(get_candidate_compatibility))
        .route("/:id/requests", get(list_team_requests).post(create_join_request))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
