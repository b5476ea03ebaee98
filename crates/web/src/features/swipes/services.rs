use sqlx::PgPool;
use storage::{
    dto::{
        swipe::{SwipePreferenceRequest, SwipeResponse},
        user::UserSummary,
    },
    error::{Conflict, Result},
    models::{SwipeAction, SwipePreference},
    repository::{PreferenceRepository, UserRepository},
    services::{Notifier, SwipeService},
};
use uuid::Uuid;

pub async fn swipe(
    pool: &PgPool,
    notifier: &Notifier,
    user_id: Uuid,
    target_user_id: Uuid,
    action: SwipeAction,
) -> Result<SwipeResponse> {
    let outcome = SwipeService::new(pool, notifier)
        .record_swipe(user_id, target_user_id, action)
        .await?;

    Ok(SwipeResponse {
        success: true,
        action: outcome.swipe.action,
        swiper: outcome.swipe.swiper(),
        is_match: outcome.matched.is_some(),
        invite_sent: outcome.invite.is_some(),
        invite_id: outcome.invite.as_ref().map(|i| i.invite_id),
        match_id: outcome.matched.as_ref().map(|(m, _)| m.match_id),
        matched_user: outcome.matched.as_ref().map(|(_, u)| UserSummary::from(u)),
    })
}

async fn current_hackathon(pool: &PgPool, user_id: Uuid) -> Result<Uuid> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    Ok(user.current_hackathon_id.ok_or(Conflict::NotRegistered)?)
}

/// Stored preferences for the caller's current hackathon, or the empty filter
pub async fn get_preferences(pool: &PgPool, user_id: Uuid) -> Result<SwipePreference> {
    let hackathon_id = current_hackathon(pool, user_id).await?;

    let preference = PreferenceRepository::new(pool)
        .find(user_id, hackathon_id)
        .await?
        .unwrap_or_else(|| SwipePreference {
            user_id,
            hackathon_id,
            ..Default::default()
        });

    Ok(preference)
}

pub async fn update_preferences(
    pool: &PgPool,
    user_id: Uuid,
    req: &SwipePreferenceRequest,
) -> Result<SwipePreference> {
    let hackathon_id = current_hackathon(pool, user_id).await?;
    PreferenceRepository::new(pool).upsert(user_id, hackathon_id, req).await
}
