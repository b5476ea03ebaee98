use sqlx::PgPool;
use storage::{
    dto::hackathon::CreateHackathonRequest,
    error::Result,
    models::{Hackathon, HackathonParticipant, HackathonStatus},
    repository::HackathonRepository,
    services::hackathons,
};
use uuid::Uuid;

pub async fn list_hackathons(pool: &PgPool) -> Result<Vec<Hackathon>> {
    let repo = HackathonRepository::new(pool);
    repo.list().await
}

pub async fn get_hackathon(pool: &PgPool, hackathon_id: Uuid) -> Result<Hackathon> {
    let repo = HackathonRepository::new(pool);
    repo.find_by_id(hackathon_id).await
}

pub async fn create_hackathon(pool: &PgPool, request: &CreateHackathonRequest) -> Result<Hackathon> {
    let repo = HackathonRepository::new(pool);
    repo.create(request).await
}

pub async fn update_status(pool: &PgPool, hackathon_id: Uuid, status: HackathonStatus) -> Result<Hackathon> {
    hackathons::advance_status(pool, hackathon_id, status).await
}

pub async fn register(pool: &PgPool, user_id: Uuid, hackathon_id: Uuid) -> Result<HackathonParticipant> {
    hackathons::register(pool, user_id, hackathon_id).await
}
