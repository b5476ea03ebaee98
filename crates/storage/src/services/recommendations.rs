use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::dto::user::CandidateResponse;
use crate::error::{Conflict, Result};
use crate::models::{SwiperIdentity, SwipePreference, User};
use crate::repository::{CustomizationRepository, PreferenceRepository, TeamRepository, UserRepository};

pub const CANDIDATE_LIMIT: i64 = 20;

/// Up to `CANDIDATE_LIMIT` looking participants of the caller's hackathon that the caller's
/// swiper identity has not decided on yet, filtered by the caller's preferences.
pub async fn get_candidates(pool: &PgPool, user_id: Uuid) -> Result<Vec<CandidateResponse>> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    let hackathon_id = user.current_hackathon_id.ok_or(Conflict::NotRegistered)?;

    let team = TeamRepository::new(pool).find_captained(user_id, hackathon_id).await?;
    let swiper = SwiperIdentity::resolve(user_id, team.map(|t| t.team_id));
    let preference = PreferenceRepository::new(pool).find(user_id, hackathon_id).await?;

    let mut query = candidate_query(hackathon_id, user_id, swiper.id(), preference.as_ref());
    let candidates = query.build_query_as::<User>().fetch_all(pool).await?;

    debug!(user = %user_id, swiper = ?swiper, count = candidates.len(), "candidates selected");

    let ids: Vec<Uuid> = candidates.iter().map(|c| c.user_id).collect();
    let mut cosmetics = CustomizationRepository::new(pool).equipped_for(&ids).await?;

    Ok(candidates
        .into_iter()
        .map(|c| {
            let equipped = cosmetics.remove(&c.user_id);
            CandidateResponse::new(c, equipped)
        })
        .collect())
}

pub fn candidate_query<'a>(
    hackathon_id: Uuid,
    user_id: Uuid,
    swiper_id: Uuid,
    preference: Option<&'a SwipePreference>,
) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT u.*
        FROM hackathon_participants hp
        INNER JOIN users u ON u.user_id = hp.user_id
        WHERE hp.status = 'looking'
        "#,
    );

    query.push(" AND hp.hackathon_id = ");
    query.push_bind(hackathon_id);
    query.push(" AND u.user_id <> ");
    query.push_bind(user_id);
    query.push(" AND NOT EXISTS (SELECT 1 FROM swipes s WHERE s.target_user_id = u.user_id AND s.swiper_id = ");
    query.push_bind(swiper_id);
    query.push(")");

    if let Some(preference) = preference {
        push_preference_filters(&mut query, preference);
    }

    query.push(" ORDER BY hp.created_at, u.user_id LIMIT ");
    query.push_bind(CANDIDATE_LIMIT);

    query
}

/// Filters are combined with AND; list filters match on any element
fn push_preference_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, preference: &'a SwipePreference) {
    if let Some(min) = preference.min_mmr {
        query.push(" AND u.mmr >= ");
        query.push_bind(min);
    }

    if let Some(max) = preference.max_mmr {
        query.push(" AND u.mmr <= ");
        query.push_bind(max);
    }

    if !preference.preferred_experience.is_empty() {
        query.push(" AND u.experience = ANY(");
        query.push_bind(&preference.preferred_experience);
        query.push(")");
    }

    if preference.verified_only {
        query.push(" AND cardinality(u.verified_skills) > 0");
    }

    if !preference.preferred_skills.is_empty() {
        query.push(" AND u.skills && ");
        query.push_bind(&preference.preferred_skills);
    }

    if !preference.preferred_roles.is_empty() {
        query.push(" AND u.looking_for && ");
        query.push_bind(&preference.preferred_roles);
    }
}
