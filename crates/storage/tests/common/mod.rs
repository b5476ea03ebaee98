//! Shared setup for the Postgres-backed tests.
//!
//! Every test returns early unless `DATABASE_URL` is set. Rows are scoped to a fresh
//! hackathon per test, so tests can share one database and run in parallel.

#![allow(dead_code)]

use sqlx::PgPool;
use storage::Database;
use storage::dto::team::CreateTeamRequest;
use storage::models::Team;
use storage::services::{MembershipService, Notifier, hackathons};
use uuid::Uuid;

pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = Database::with_max_connections(&url, 8)
        .await
        .expect("Failed to connect to DATABASE_URL");
    db.run_migrations().await.expect("Failed to run migrations");
    Some(db.pool().clone())
}

pub async fn seed_hackathon(pool: &PgPool, team_size: i32) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO hackathons (name, status, team_size) VALUES ('Spring Jam', 'registration_open', $1) RETURNING hackathon_id",
    )
    .bind(team_size)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_user(pool: &PgPool, name: &str, mmr: i32) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO users (username, name, mmr, skills, looking_for) VALUES ($1, $1, $2, '{rust}', '{backend}') RETURNING user_id",
    )
    .bind(name)
    .bind(mmr)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn registered_user(pool: &PgPool, hackathon_id: Uuid, name: &str, mmr: i32) -> Uuid {
    let user_id = seed_user(pool, name, mmr).await;
    hackathons::register(pool, user_id, hackathon_id).await.unwrap();
    user_id
}

pub async fn create_team(pool: &PgPool, notifier: &Notifier, captain: Uuid, hackathon_id: Uuid) -> Team {
    let req = CreateTeamRequest {
        name: "Borrow Checkers".to_string(),
        hackathon_id,
        description: None,
    };
    MembershipService::new(pool, notifier)
        .create_team(captain, &req)
        .await
        .unwrap()
}

pub async fn participant_status(pool: &PgPool, hackathon_id: Uuid, user_id: Uuid) -> String {
    sqlx::query_scalar("SELECT status FROM hackathon_participants WHERE hackathon_id = $1 AND user_id = $2")
        .bind(hackathon_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn team_of(pool: &PgPool, user_id: Uuid) -> Option<Uuid> {
    sqlx::query_scalar("SELECT team_id FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn pending_invites_for(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM team_invites WHERE invited_user_id = $1 AND status = 'pending'")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn pending_requests_by(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM team_join_requests WHERE user_id = $1 AND status = 'pending'")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
