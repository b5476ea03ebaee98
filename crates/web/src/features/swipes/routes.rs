use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{get_preferences, swipe, update_preferences};
use crate::middleware::auth::{JwtKeys, require_auth};
use crate::state::AppState;

pub fn routes(jwt: JwtKeys) -> Router<AppState> {
    Router::new()
        .route("/", post(swipe))
        .route("/preferences", get(get_preferences).put(update_preferences))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
