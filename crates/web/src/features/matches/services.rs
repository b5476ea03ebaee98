use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{swipe::MatchResponse, user::UserSummary},
    error::Result,
    models::User,
    repository::{MatchRepository, UserRepository},
};
use uuid::Uuid;

/// Caller's matches, each with the other person in it
pub async fn list_matches(pool: &PgPool, user_id: Uuid) -> Result<Vec<MatchResponse>> {
    let matches = MatchRepository::new(pool).list_for_user(user_id).await?;

    let ids: Vec<Uuid> = matches.iter().map(|m| m.counterpart_of(user_id)).collect();
    let users: HashMap<Uuid, User> = UserRepository::new(pool)
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    Ok(matches
        .into_iter()
        .filter_map(|m| {
            let user = users.get(&m.counterpart_of(user_id))?;
            Some(MatchResponse {
                match_id: m.match_id,
                swiper: m.swiper(),
                matched_at: m.created_at,
                user: UserSummary::from(user),
            })
        })
        .collect())
}
