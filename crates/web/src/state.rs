use axum::extract::FromRef;
use storage::{Database, services::Notifier};

use crate::middleware::auth::JwtKeys;

/// Shared handles injected into every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub notifier: Notifier,
    pub jwt: JwtKeys,
}
