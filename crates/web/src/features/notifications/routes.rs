use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{list_notifications, mark_read};
use crate::middleware::auth::{JwtKeys, require_auth};
use crate::state::AppState;

pub fn routes(jwt: JwtKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id/read", post(mark_read))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
