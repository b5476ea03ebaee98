use axum::{Router, middleware, routing::get};

use super::handlers::list_matches;
use crate::middleware::auth::{JwtKeys, require_auth};
use crate::state::AppState;

pub fn routes(jwt: JwtKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
