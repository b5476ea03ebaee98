use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{Conflict, Result, StorageError};
use crate::models::{Hackathon, HackathonParticipant, HackathonStatus};
use crate::repository::HackathonRepository;

/// Register a user for a hackathon and make it their current one
pub async fn register(pool: &PgPool, user_id: Uuid, hackathon_id: Uuid) -> Result<HackathonParticipant> {
    let mut tx = pool.begin().await?;

    let status = sqlx::query_scalar::<_, String>(
        "SELECT status FROM hackathons WHERE hackathon_id = $1 FOR SHARE",
    )
    .bind(hackathon_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StorageError::NotFound("hackathon"))?;

    if status != HackathonStatus::RegistrationOpen.as_str() {
        return Err(Conflict::RegistrationClosed.into());
    }

    let participant = sqlx::query_as::<_, HackathonParticipant>(
        r#"
        INSERT INTO hackathon_participants (hackathon_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (hackathon_id, user_id) DO NOTHING
        RETURNING participant_id, hackathon_id, user_id, status, created_at
        "#,
    )
    .bind(hackathon_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(Conflict::AlreadyRegistered)?;

    let updated = sqlx::query("UPDATE users SET current_hackathon_id = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(hackathon_id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(StorageError::NotFound("user"));
    }

    tx.commit().await?;

    info!(user = %user_id, hackathon = %hackathon_id, "registered for hackathon");
    Ok(participant)
}

/// Move a hackathon forward through its lifecycle
pub async fn advance_status(pool: &PgPool, hackathon_id: Uuid, next: HackathonStatus) -> Result<Hackathon> {
    let repo = HackathonRepository::new(pool);
    let hackathon = repo.find_by_id(hackathon_id).await?;

    if !hackathon.status.can_transition_to(next) {
        return Err(StorageError::Invalid(format!(
            "cannot move hackathon from {} to {}",
            hackathon.status, next
        )));
    }

    let hackathon = repo.update_status(hackathon_id, next).await?;
    info!(hackathon = %hackathon_id, status = %next, "hackathon status updated");
    Ok(hackathon)
}
