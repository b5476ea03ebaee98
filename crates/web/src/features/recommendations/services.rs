use sqlx::PgPool;
use storage::{dto::user::CandidateResponse, error::Result, services::recommendations};
use uuid::Uuid;

pub async fn get_recommendations(pool: &PgPool, user_id: Uuid) -> Result<Vec<CandidateResponse>> {
    recommendations::get_candidates(pool, user_id).await
}
