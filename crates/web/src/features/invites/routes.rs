use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{
    accept_invite, cancel_invite, create_invite, decline_invite, list_incoming, list_outgoing,
};
use crate::middleware::auth::{JwtKeys, require_auth};
use crate::state::AppState;

pub fn routes(jwt: JwtKeys) -> Router<AppState> {
    Router::new()
        .route("/", post(create_invite))
        .route("/incoming", get(list_incoming))
        .route("/outgoing", get(list_outgoing))
        .route("/:id", delete(cancel_invite))
        .route("/:id/accept", post(accept_invite))
        .route("/:id/decline", post(decline_invite))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
