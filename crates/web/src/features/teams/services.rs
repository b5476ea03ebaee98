use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        balance::{CandidateCompatibility, TeamBalance},
        team::{CreateTeamRequest, JoinRequestResponse, TeamResponse},
        user::UserSummary,
    },
    error::{Conflict, Result, StorageError},
    models::{Team, TeamStatus, User},
    repository::{
        HackathonRepository, JoinRequestRepository, TeamRepository, UserRepository,
        join_request::JoinRequestWithTeam,
    },
    services::{MembershipService, Notifier, team_balance},
};
use uuid::Uuid;

/// Build the public view of a team for `viewer`
pub async fn team_response(pool: &PgPool, team: Team, viewer: Uuid) -> Result<TeamResponse> {
    let hackathon = HackathonRepository::new(pool).find_by_id(team.hackathon_id).await?;
    let roster = UserRepository::new(pool).list_team_roster(team.team_id).await?;
    let members = roster.iter().map(UserSummary::from).collect();

    Ok(TeamResponse::new(team, members, hackathon.team_size, viewer))
}

/// Teams of the caller's current hackathon
pub async fn list_teams(pool: &PgPool, user_id: Uuid) -> Result<Vec<TeamResponse>> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    let hackathon_id = user.current_hackathon_id.ok_or(Conflict::NotRegistered)?;

    let teams = TeamRepository::new(pool).list_by_hackathon(hackathon_id).await?;
    let mut response = Vec::with_capacity(teams.len());
    for team in teams {
        response.push(team_response(pool, team, user_id).await?);
    }

    Ok(response)
}

pub async fn get_team(pool: &PgPool, team_id: Uuid, viewer: Uuid) -> Result<TeamResponse> {
    let team = TeamRepository::new(pool).find_by_id(team_id).await?;
    team_response(pool, team, viewer).await
}

/// The caller's team in their current hackathon
pub async fn get_my_team(pool: &PgPool, user_id: Uuid) -> Result<TeamResponse> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    let hackathon_id = user.current_hackathon_id.ok_or(StorageError::NotFound("team"))?;

    let team = TeamRepository::new(pool)
        .find_for_user(user_id, hackathon_id)
        .await?
        .ok_or(StorageError::NotFound("team"))?;

    team_response(pool, team, user_id).await
}

pub async fn create_team(
    pool: &PgPool,
    notifier: &Notifier,
    user_id: Uuid,
    req: &CreateTeamRequest,
) -> Result<TeamResponse> {
    let team = MembershipService::new(pool, notifier).create_team(user_id, req).await?;
    team_response(pool, team, user_id).await
}

pub async fn join_by_code(
    pool: &PgPool,
    notifier: &Notifier,
    user_id: Uuid,
    code: &str,
) -> Result<TeamResponse> {
    let team = MembershipService::new(pool, notifier).join_by_code(user_id, code).await?;
    team_response(pool, team, user_id).await
}

pub async fn update_status(
    pool: &PgPool,
    notifier: &Notifier,
    user_id: Uuid,
    team_id: Uuid,
    status: TeamStatus,
) -> Result<TeamResponse> {
    let team = MembershipService::new(pool, notifier)
        .update_status(user_id, team_id, status)
        .await?;
    team_response(pool, team, user_id).await
}

/// Roster of a team the caller belongs to, captain first
async fn own_roster(pool: &PgPool, user_id: Uuid, team_id: Uuid) -> Result<Vec<User>> {
    let team = TeamRepository::new(pool).find_by_id(team_id).await?;
    let users = UserRepository::new(pool);
    let caller = users.find_by_id(user_id).await?;
    if !team.has_member(&caller) {
        return Err(StorageError::Forbidden("only team members can view team balance"));
    }

    users.list_team_roster(team_id).await
}

pub async fn get_team_balance(pool: &PgPool, user_id: Uuid, team_id: Uuid) -> Result<TeamBalance> {
    let roster = own_roster(pool, user_id, team_id).await?;

    Ok(team_balance::score(&roster))
}

pub async fn candidate_compatibility(
    pool: &PgPool,
    user_id: Uuid,
    team_id: Uuid,
    candidate_id: Uuid,
) -> Result<CandidateCompatibility> {
    let roster = own_roster(pool, user_id, team_id).await?;
    let candidate = UserRepository::new(pool)
        .find_by_id(candidate_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) => StorageError::NotFound("candidate"),
            other => other,
        })?;

    Ok(team_balance::compatibility(&roster, &candidate))
}

/// Pending requests for a team; captain only
pub async fn list_team_requests(
    pool: &PgPool,
    user_id: Uuid,
    team_id: Uuid,
) -> Result<Vec<JoinRequestResponse>> {
    let team = TeamRepository::new(pool).find_by_id(team_id).await?;
    if !team.is_captain(user_id) {
        return Err(StorageError::Forbidden("only the captain can view join requests"));
    }

    let requests = JoinRequestRepository::new(pool).list_pending_for_team(team_id).await?;
    join_request_responses(pool, requests).await
}

pub async fn list_my_requests(pool: &PgPool, user_id: Uuid) -> Result<Vec<JoinRequestResponse>> {
    let requests = JoinRequestRepository::new(pool).list_for_user(user_id).await?;
    join_request_responses(pool, requests).await
}

async fn join_request_responses(
    pool: &PgPool,
    requests: Vec<JoinRequestWithTeam>,
) -> Result<Vec<JoinRequestResponse>> {
    let ids: Vec<Uuid> = requests.iter().map(|r| r.request.user_id).collect();
    let users: HashMap<Uuid, User> = UserRepository::new(pool)
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    Ok(requests
        .into_iter()
        .filter_map(|r| {
            let user = users.get(&r.request.user_id)?;
            Some(JoinRequestResponse {
                request_id: r.request.request_id,
                team_id: r.request.team_id,
                team_name: r.team_name,
                status: r.request.status,
                message: r.request.message,
                user: UserSummary::from(user),
                created_at: r.request.created_at,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{Database, services::hackathons};

    // Skipped unless DATABASE_URL points at a Postgres the tests may write to
    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let db = Database::new(&url).await.unwrap();
        db.run_migrations().await.unwrap();
        Some(db.pool().clone())
    }

    async fn registered_user(pool: &PgPool, hackathon_id: Uuid, name: &str) -> Uuid {
        let user_id = sqlx::query_scalar("INSERT INTO users (username, name) VALUES ($1, $1) RETURNING user_id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap();
        hackathons::register(pool, user_id, hackathon_id).await.unwrap();
        user_id
    }

    #[tokio::test]
    async fn test_balance_is_limited_to_team_members() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let (notifier, _rx) = Notifier::channel();

        let hackathon_id: Uuid = sqlx::query_scalar(
            "INSERT INTO hackathons (name, status) VALUES ('Spring Jam', 'registration_open') RETURNING hackathon_id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        let captain = registered_user(&pool, hackathon_id, "cap").await;
        let member = registered_user(&pool, hackathon_id, "member").await;
        let outsider = registered_user(&pool, hackathon_id, "outsider").await;

        let req = CreateTeamRequest {
            name: "Borrow Checkers".to_string(),
            hackathon_id,
            description: None,
        };
        let team = create_team(&pool, &notifier, captain, &req).await.unwrap();
        let code = team.invite_code.clone().unwrap();
        join_by_code(&pool, &notifier, member, &code).await.unwrap();

        let err = get_team_balance(&pool, outsider, team.team_id).await.unwrap_err();
        assert!(matches!(err, StorageError::Forbidden(_)));
        let err = candidate_compatibility(&pool, outsider, team.team_id, captain)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Forbidden(_)));

        let balance = get_team_balance(&pool, member, team.team_id).await.unwrap();
        assert_eq!(balance.mmr_stats.spread, 0);
        assert_eq!(balance.mmr_stats.average, 1000.0);
        assert!(candidate_compatibility(&pool, captain, team.team_id, outsider).await.is_ok());
    }
}
