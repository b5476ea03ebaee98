mod common;

use common::*;
use sqlx::PgPool;
use storage::dto::user::CandidateResponse;
use storage::models::SwipeAction;
use storage::services::recommendations::{self, CANDIDATE_LIMIT};
use storage::services::{Notifier, SwipeService};
use uuid::Uuid;

fn sorted_ids(candidates: Vec<CandidateResponse>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = candidates.into_iter().map(|c| c.user_id).collect();
    ids.sort();
    ids
}

fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

async fn set_profile(pool: &PgPool, user_id: Uuid, skills: &[&str], roles: &[&str], experience: &str, verified: &[&str]) {
    sqlx::query(
        "UPDATE users SET skills = $2, looking_for = $3, experience = $4, verified_skills = $5 WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(skills)
    .bind(roles)
    .bind(experience)
    .bind(verified)
    .execute(pool)
    .await
    .unwrap();
}

async fn set_preference(
    pool: &PgPool,
    user_id: Uuid,
    hackathon_id: Uuid,
    skills: &[&str],
    roles: &[&str],
    experience: &[&str],
    verified_only: bool,
) {
    sqlx::query(
        r#"
        INSERT INTO swipe_preferences
            (user_id, hackathon_id, preferred_skills, preferred_roles, preferred_experience, verified_only)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, hackathon_id) DO UPDATE
        SET preferred_skills = EXCLUDED.preferred_skills,
            preferred_roles = EXCLUDED.preferred_roles,
            preferred_experience = EXCLUDED.preferred_experience,
            verified_only = EXCLUDED.verified_only
        "#,
    )
    .bind(user_id)
    .bind(hackathon_id)
    .bind(skills)
    .bind(roles)
    .bind(experience)
    .bind(verified_only)
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn recommendations_skip_swiped_teamed_and_filtered_users() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let me = registered_user(&pool, hackathon_id, "me", 1000).await;
    let strong = registered_user(&pool, hackathon_id, "strong", 1300).await;
    let weak = registered_user(&pool, hackathon_id, "weak", 1100).await;
    let swiped = registered_user(&pool, hackathon_id, "swiped", 1400).await;
    let captain = registered_user(&pool, hackathon_id, "cap", 1500).await;
    create_team(&pool, &notifier, captain, hackathon_id).await;

    SwipeService::new(&pool, &notifier)
        .record_swipe(me, swiped, SwipeAction::Pass)
        .await
        .unwrap();

    let candidates = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(sorted_ids(candidates), sorted(vec![strong, weak]));

    sqlx::query("INSERT INTO swipe_preferences (user_id, hackathon_id, min_mmr) VALUES ($1, $2, 1200)")
        .bind(me)
        .bind(hackathon_id)
        .execute(&pool)
        .await
        .unwrap();

    let candidates = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(sorted_ids(candidates), vec![strong]);
}

#[tokio::test]
async fn candidate_queue_is_capped() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let me = registered_user(&pool, hackathon_id, "me", 1000).await;
    for i in 0..CANDIDATE_LIMIT + 5 {
        registered_user(&pool, hackathon_id, &format!("user-{i}"), 1000).await;
    }

    let first = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(first.len() as i64, CANDIDATE_LIMIT);
    assert!(first.iter().all(|c| c.user_id != me));

    let again = recommendations::get_candidates(&pool, me).await.unwrap();
    let first_ids: Vec<Uuid> = first.iter().map(|c| c.user_id).collect();
    let again_ids: Vec<Uuid> = again.iter().map(|c| c.user_id).collect();
    assert_eq!(first_ids, again_ids);
}

#[tokio::test]
async fn preference_lists_filter_real_profiles() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let me = registered_user(&pool, hackathon_id, "me", 1000).await;
    let senior_backend = registered_user(&pool, hackathon_id, "senior", 1000).await;
    let junior_frontend = registered_user(&pool, hackathon_id, "junior-fe", 1000).await;
    let junior_designer = registered_user(&pool, hackathon_id, "junior-design", 1000).await;

    set_profile(&pool, senior_backend, &["rust", "sql"], &["backend"], "senior", &["rust"]).await;
    set_profile(&pool, junior_frontend, &["typescript"], &["frontend"], "junior", &[]).await;
    set_profile(&pool, junior_designer, &["figma", "rust"], &["designer"], "junior", &[]).await;

    set_preference(&pool, me, hackathon_id, &["rust"], &[], &[], false).await;
    let candidates = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(sorted_ids(candidates), sorted(vec![senior_backend, junior_designer]));

    set_preference(&pool, me, hackathon_id, &["rust"], &["designer", "frontend"], &[], false).await;
    let candidates = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(sorted_ids(candidates), vec![junior_designer]);

    set_preference(&pool, me, hackathon_id, &[], &[], &["junior"], false).await;
    let candidates = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(sorted_ids(candidates), sorted(vec![junior_frontend, junior_designer]));

    set_preference(&pool, me, hackathon_id, &[], &[], &[], true).await;
    let candidates = recommendations::get_candidates(&pool, me).await.unwrap();
    assert_eq!(sorted_ids(candidates), vec![senior_backend]);
}
