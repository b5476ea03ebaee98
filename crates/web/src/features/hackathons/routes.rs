use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    create_hackathon, get_hackathon, list_hackathons, register, update_hackathon_status,
};
use crate::middleware::auth::{JwtKeys, require_auth};
use crate::state::AppState;

pub fn routes(jwt: JwtKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_hackathons).post(create_hackathon))
        .route("/:id", get(get_hackathon))
        .route("/:id/status", put(update_hackathon_status))
        .route("/:id/register", post(register))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
