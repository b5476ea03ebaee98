use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use super::notifications::{NotificationEvent, Notifier};
use super::swipes::insert_pending_invite;
use crate::dto::team::CreateTeamRequest;
use crate::error::{Conflict, Result, StorageError};
use crate::models::{
    Hackathon, InviteStatus, JoinRequestStatus, Team, TeamInvite, TeamJoinRequest, TeamStatus, User,
};
use crate::repository::{InviteRepository, JoinRequestRepository, TeamRepository, UserRepository};

const INVITE_CODE_ATTEMPTS: usize = 5;

/// Random 8 hex character team invite code
pub fn generate_invite_code() -> String {
    format!("{:08x}", rand::random::<u32>())
}

/// Every transition that changes who is on a team.
///
/// Writers lock the team row first and the user row second, so the capacity check and
/// the membership write are serialized per team.
pub struct MembershipService<'a> {
    pool: &'a PgPool,
    notifier: &'a Notifier,
}

impl<'a> MembershipService<'a> {
    pub fn new(pool: &'a PgPool, notifier: &'a Notifier) -> Self {
        Self { pool, notifier }
    }

    pub async fn create_team(&self, captain_id: Uuid, req: &CreateTeamRequest) -> Result<Team> {
        let mut tx = self.pool.begin().await?;

        let hackathon = lock_hackathon(&mut tx, req.hackathon_id).await?;
        let captain = lock_user(&mut tx, captain_id).await?;

        if captains_in(&mut tx, captain_id, hackathon.hackathon_id).await? {
            return Err(Conflict::AlreadyCaptain.into());
        }
        if captain.team_id.is_some() || is_teamed_in(&mut tx, captain_id, hackathon.hackathon_id).await? {
            return Err(Conflict::AlreadyTeamed.into());
        }
        if hackathon.max_teams > 0
            && count_teams(&mut tx, hackathon.hackathon_id).await? >= i64::from(hackathon.max_teams)
        {
            return Err(Conflict::TeamLimitReached.into());
        }

        let mut team = None;
        for _ in 0..INVITE_CODE_ATTEMPTS {
            team = insert_team(&mut tx, req, captain_id, &generate_invite_code()).await?;
            if team.is_some() {
                break;
            }
        }
        let team = team.ok_or_else(|| {
            StorageError::ConstraintViolation("could not generate a unique invite code".to_string())
        })?;

        settle_membership(&mut tx, captain_id, &team).await?;
        tx.commit().await?;

        info!(team_id = %team.team_id, captain = %captain_id, "team created");
        Ok(team)
    }

    pub async fn join_by_code(&self, user_id: Uuid, code: &str) -> Result<Team> {
        let mut tx = self.pool.begin().await?;

        let team = lock_team_by_code(&mut tx, code).await?;
        let user = lock_user(&mut tx, user_id).await?;
        ensure_can_join(&mut tx, &team, &user).await?;
        settle_membership(&mut tx, user_id, &team).await?;

        tx.commit().await?;

        info!(team_id = %team.team_id, user = %user_id, "joined team by code");
        self.notifier.send(NotificationEvent::accepted(
            team.captain_id,
            team.team_id,
            &team.name,
            format!("{} joined your team '{}'", user.name, team.name),
        ));
        Ok(team)
    }

    pub async fn leave(&self, user_id: Uuid, team_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let team = lock_team(&mut tx, team_id).await?;
        if team.is_captain(user_id) {
            return Err(Conflict::CaptainCannotLeave.into());
        }
        let user = lock_user(&mut tx, user_id).await?;
        if user.team_id != Some(team_id) {
            return Err(Conflict::NotTeamMember.into());
        }

        release_membership(&mut tx, user_id, team.hackathon_id).await?;
        tx.commit().await?;

        info!(team_id = %team_id, user = %user_id, "left team");
        Ok(())
    }

    pub async fn kick(&self, captain_id: Uuid, team_id: Uuid, member_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let team = lock_team(&mut tx, team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can kick members"));
        }
        if member_id == captain_id {
            return Err(Conflict::CannotKickSelf.into());
        }
        let member = lock_user(&mut tx, member_id).await?;
        if member.team_id != Some(team_id) {
            return Err(Conflict::NotTeamMember.into());
        }

        release_membership(&mut tx, member_id, team.hackathon_id).await?;
        tx.commit().await?;

        info!(team_id = %team_id, user = %member_id, "member kicked");
        self.notifier.send(NotificationEvent::rejected(
            member_id,
            team.team_id,
            &team.name,
            format!("You were removed from team '{}'", team.name),
        ));
        Ok(())
    }

    pub async fn update_status(&self, captain_id: Uuid, team_id: Uuid, status: TeamStatus) -> Result<Team> {
        let teams = TeamRepository::new(self.pool);
        let team = teams.find_by_id(team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can update team status"));
        }

        let team = teams.update_status(team_id, status).await?;
        info!(team_id = %team_id, status = %status, "team status updated");
        Ok(team)
    }

    pub async fn regenerate_invite_code(&self, captain_id: Uuid, team_id: Uuid) -> Result<Team> {
        let teams = TeamRepository::new(self.pool);
        let team = teams.find_by_id(team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can generate invite codes"));
        }

        for _ in 0..INVITE_CODE_ATTEMPTS {
            match teams.set_invite_code(team_id, &generate_invite_code()).await {
                Ok(team) => return Ok(team),
                Err(e) if e.is_unique_violation() => continue,
                Err(e) => return Err(e),
            }
        }

        Err(StorageError::ConstraintViolation(
            "could not generate a unique invite code".to_string(),
        ))
    }

    pub async fn request_to_join(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        message: Option<String>,
    ) -> Result<TeamJoinRequest> {
        let mut tx = self.pool.begin().await?;

        let team = lock_team(&mut tx, team_id).await?;
        let user = lock_user(&mut tx, user_id).await?;
        ensure_can_join(&mut tx, &team, &user).await?;

        let request = sqlx::query_as::<_, TeamJoinRequest>(
            r#"
            INSERT INTO team_join_requests (team_id, user_id, message)
            VALUES ($1, $2, $3)
            ON CONFLICT (team_id, user_id) WHERE status = 'pending' DO NOTHING
            RETURNING request_id, team_id, user_id, message, status, created_at, updated_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(message)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Conflict::PendingRequestExists)?;

        tx.commit().await?;

        self.notifier.send(NotificationEvent::join_request(
            team.captain_id,
            request.request_id,
            team.team_id,
            &team.name,
            &user.name,
        ));
        Ok(request)
    }

    pub async fn accept_request(&self, captain_id: Uuid, request_id: Uuid) -> Result<TeamJoinRequest> {
        let pending = JoinRequestRepository::new(self.pool).find_by_id(request_id).await?;

        let mut tx = self.pool.begin().await?;

        let team = lock_team(&mut tx, pending.team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can handle join requests"));
        }
        let user = lock_user(&mut tx, pending.user_id).await?;

        let request = close_request(&mut tx, request_id, JoinRequestStatus::Accepted).await?;
        ensure_can_join(&mut tx, &team, &user).await?;
        settle_membership(&mut tx, request.user_id, &team).await?;

        tx.commit().await?;

        info!(team_id = %team.team_id, user = %request.user_id, "join request accepted");
        self.notifier.send(NotificationEvent::accepted(
            request.user_id,
            team.team_id,
            &team.name,
            format!("Your request to join '{}' was accepted", team.name),
        ));
        Ok(request)
    }

    pub async fn reject_request(&self, captain_id: Uuid, request_id: Uuid) -> Result<TeamJoinRequest> {
        let pending = JoinRequestRepository::new(self.pool).find_by_id(request_id).await?;
        let team = TeamRepository::new(self.pool).find_by_id(pending.team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can handle join requests"));
        }

        let mut conn = self.pool.acquire().await?;
        let request = close_request(&mut conn, request_id, JoinRequestStatus::Rejected).await?;

        self.notifier.send(NotificationEvent::rejected(
            request.user_id,
            team.team_id,
            &team.name,
            format!("Your request to join '{}' was rejected", team.name),
        ));
        Ok(request)
    }

    pub async fn cancel_request(&self, user_id: Uuid, request_id: Uuid) -> Result<TeamJoinRequest> {
        let pending = JoinRequestRepository::new(self.pool).find_by_id(request_id).await?;
        if pending.user_id != user_id {
            return Err(StorageError::Forbidden("only the requester can cancel a join request"));
        }

        let mut conn = self.pool.acquire().await?;
        close_request(&mut conn, request_id, JoinRequestStatus::Cancelled).await
    }

    pub async fn invite(&self, captain_id: Uuid, team_id: Uuid, user_id: Uuid) -> Result<TeamInvite> {
        let mut tx = self.pool.begin().await?;

        let team = lock_team(&mut tx, team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can invite users"));
        }
        let user = lock_user(&mut tx, user_id).await?;
        ensure_can_join(&mut tx, &team, &user).await?;

        let invite = insert_pending_invite(&mut tx, team_id, user_id, captain_id)
            .await?
            .ok_or(Conflict::PendingInviteExists)?;

        tx.commit().await?;

        let captain = UserRepository::new(self.pool).find_by_id(captain_id).await?;

        self.notifier.send(NotificationEvent::team_invite(
            user_id,
            invite.invite_id,
            team.team_id,
            &team.name,
            &captain.name,
        ));
        Ok(invite)
    }

    pub async fn accept_invite(&self, user_id: Uuid, invite_id: Uuid) -> Result<Team> {
        let pending = InviteRepository::new(self.pool).find_by_id(invite_id).await?;
        if pending.invited_user_id != user_id {
            return Err(StorageError::Forbidden("this invite is addressed to someone else"));
        }

        let mut tx = self.pool.begin().await?;

        let team = lock_team(&mut tx, pending.team_id).await?;
        let user = lock_user(&mut tx, user_id).await?;
        let invite = close_invite(&mut tx, invite_id, InviteStatus::Accepted).await?;
        ensure_can_join(&mut tx, &team, &user).await?;
        settle_membership(&mut tx, user_id, &team).await?;

        tx.commit().await?;

        info!(team_id = %team.team_id, user = %user_id, "invite accepted");
        self.notifier.send(NotificationEvent::accepted(
            invite.inviter_id,
            team.team_id,
            &team.name,
            format!("{} accepted the invite to '{}'", user.name, team.name),
        ));
        Ok(team)
    }

    pub async fn decline_invite(&self, user_id: Uuid, invite_id: Uuid) -> Result<TeamInvite> {
        let pending = InviteRepository::new(self.pool).find_by_id(invite_id).await?;
        if pending.invited_user_id != user_id {
            return Err(StorageError::Forbidden("this invite is addressed to someone else"));
        }
        let team = TeamRepository::new(self.pool).find_by_id(pending.team_id).await?;

        let mut conn = self.pool.acquire().await?;
        let invite = close_invite(&mut conn, invite_id, InviteStatus::Declined).await?;

        self.notifier.send(NotificationEvent::rejected(
            invite.inviter_id,
            team.team_id,
            &team.name,
            format!("Your invite to '{}' was declined", team.name),
        ));
        Ok(invite)
    }

    pub async fn cancel_invite(&self, captain_id: Uuid, invite_id: Uuid) -> Result<TeamInvite> {
        let pending = InviteRepository::new(self.pool).find_by_id(invite_id).await?;
        let team = TeamRepository::new(self.pool).find_by_id(pending.team_id).await?;
        if !team.is_captain(captain_id) {
            return Err(StorageError::Forbidden("only the captain can cancel invites"));
        }

        let mut conn = self.pool.acquire().await?;
        close_invite(&mut conn, invite_id, InviteStatus::Cancelled).await
    }
}

/// Whether the user already belongs to a team of the hackathon, as member or as captain
pub(crate) async fn is_teamed_in(conn: &mut PgConnection, user_id: Uuid, hackathon_id: Uuid) -> Result<bool> {
    let teamed = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM users u
            INNER JOIN teams t ON t.team_id = u.team_id
            WHERE u.user_id = $1 AND t.hackathon_id = $2
        ) OR EXISTS(
            SELECT 1 FROM teams WHERE captain_id = $1 AND hackathon_id = $2
        )
        "#,
    )
    .bind(user_id)
    .bind(hackathon_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(teamed)
}

/// Members with `team_id` set, plus the captain when the captain's own row points elsewhere
pub(crate) async fn count_members(conn: &mut PgConnection, team_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM users u
        INNER JOIN teams t ON t.team_id = $1
        WHERE u.team_id = t.team_id OR u.user_id = t.captain_id
        "#,
    )
    .bind(team_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}

/// Checked in order: the team is open, the user has no team, a slot is free.
///
/// `team_id` is a single slot, so a team in any earlier hackathon also blocks the join
/// until the user leaves it. `user` must be locked by the caller.
async fn ensure_can_join(conn: &mut PgConnection, team: &Team, user: &User) -> Result<()> {
    if !team.accepts_members() {
        return Err(Conflict::TeamClosed.into());
    }

    if user.team_id.is_some() || is_teamed_in(conn, user.user_id, team.hackathon_id).await? {
        return Err(Conflict::AlreadyTeamed.into());
    }

    let max = sqlx::query_scalar::<_, i32>("SELECT team_size FROM hackathons WHERE hackathon_id = $1")
        .bind(team.hackathon_id)
        .fetch_one(&mut *conn)
        .await?;
    let current = count_members(conn, team.team_id).await?;
    if current >= i64::from(max) {
        return Err(Conflict::TeamFull { current, max }.into());
    }

    Ok(())
}

/// Put the user on the team and retire their other pending invites and requests in the hackathon
async fn settle_membership(conn: &mut PgConnection, user_id: Uuid, team: &Team) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET team_id = $2, current_hackathon_id = COALESCE(current_hackathon_id, $3)
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(team.team_id)
    .bind(team.hackathon_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO hackathon_participants (hackathon_id, user_id, status)
        VALUES ($1, $2, 'in_team')
        ON CONFLICT (hackathon_id, user_id) DO UPDATE SET status = 'in_team'
        "#,
    )
    .bind(team.hackathon_id)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        UPDATE team_invites i
        SET status = 'cancelled', updated_at = NOW()
        FROM teams t
        WHERE t.team_id = i.team_id
          AND i.invited_user_id = $1
          AND t.hackathon_id = $2
          AND i.status = 'pending'
        "#,
    )
    .bind(user_id)
    .bind(team.hackathon_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        UPDATE team_join_requests r
        SET status = 'cancelled', updated_at = NOW()
        FROM teams t
        WHERE t.team_id = r.team_id
          AND r.user_id = $1
          AND t.hackathon_id = $2
          AND r.status = 'pending'
        "#,
    )
    .bind(user_id)
    .bind(team.hackathon_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn release_membership(conn: &mut PgConnection, user_id: Uuid, hackathon_id: Uuid) -> Result<()> {
    sqlx::query("UPDATE users SET team_id = NULL WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        UPDATE hackathon_participants
        SET status = 'looking'
        WHERE user_id = $1 AND hackathon_id = $2
        "#,
    )
    .bind(user_id)
    .bind(hackathon_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn lock_hackathon(conn: &mut PgConnection, hackathon_id: Uuid) -> Result<Hackathon> {
    let hackathon = sqlx::query_as::<_, Hackathon>(
        r#"
        SELECT hackathon_id, name, description, status, team_size, max_teams,
               starts_at, ends_at, created_at
        FROM hackathons
        WHERE hackathon_id = $1
        FOR UPDATE
        "#,
    )
    .bind(hackathon_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound("hackathon"))?;

    Ok(hackathon)
}

async fn lock_team(conn: &mut PgConnection, team_id: Uuid) -> Result<Team> {
    let team = sqlx::query_as::<_, Team>(
        r#"
        SELECT team_id, hackathon_id, name, description, captain_id, status,
               invite_code, created_at
        FROM teams
        WHERE team_id = $1
        FOR UPDATE
        "#,
    )
    .bind(team_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound("team"))?;

    Ok(team)
}

async fn lock_team_by_code(conn: &mut PgConnection, code: &str) -> Result<Team> {
    let team = sqlx::query_as::<_, Team>(
        r#"
        SELECT team_id, hackathon_id, name, description, captain_id, status,
               invite_code, created_at
        FROM teams
        WHERE invite_code = $1
        FOR UPDATE
        "#,
    )
    .bind(code.trim())
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound("team"))?;

    Ok(team)
}

pub(crate) async fn lock_user(conn: &mut PgConnection, user_id: Uuid) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, telegram_user_id, username, name, bio, role, skills, looking_for,
               verified_skills, experience, mmr, pts, avatar_url, current_hackathon_id,
               team_id, created_at
        FROM users
        WHERE user_id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound("user"))?;

    Ok(user)
}

async fn captains_in(conn: &mut PgConnection, user_id: Uuid, hackathon_id: Uuid) -> Result<bool> {
    let captains = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM teams WHERE captain_id = $1 AND hackathon_id = $2)",
    )
    .bind(user_id)
    .bind(hackathon_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(captains)
}

async fn count_teams(conn: &mut PgConnection, hackathon_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams WHERE hackathon_id = $1")
        .bind(hackathon_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// `None` on invite code collision
async fn insert_team(
    conn: &mut PgConnection,
    req: &CreateTeamRequest,
    captain_id: Uuid,
    invite_code: &str,
) -> Result<Option<Team>> {
    let team = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (hackathon_id, name, description, captain_id, invite_code)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (invite_code) DO NOTHING
        RETURNING team_id, hackathon_id, name, description, captain_id, status,
                  invite_code, created_at
        "#,
    )
    .bind(req.hackathon_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(captain_id)
    .bind(invite_code)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(team)
}

async fn close_request(
    conn: &mut PgConnection,
    request_id: Uuid,
    status: JoinRequestStatus,
) -> Result<TeamJoinRequest> {
    let request = sqlx::query_as::<_, TeamJoinRequest>(
        r#"
        UPDATE team_join_requests
        SET status = $2, updated_at = NOW()
        WHERE request_id = $1 AND status = 'pending'
        RETURNING request_id, team_id, user_id, message, status, created_at, updated_at
        "#,
    )
    .bind(request_id)
    .bind(status.as_str())
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Conflict::RequestAlreadyProcessed)?;

    Ok(request)
}

async fn close_invite(conn: &mut PgConnection, invite_id: Uuid, status: InviteStatus) -> Result<TeamInvite> {
    let invite = sqlx::query_as::<_, TeamInvite>(
        r#"
        UPDATE team_invites
        SET status = $2, updated_at = NOW()
        WHERE invite_id = $1 AND status = 'pending'
        RETURNING invite_id, team_id, invited_user_id, inviter_id, status, created_at, updated_at
        "#,
    )
    .bind(invite_id)
    .bind(status.as_str())
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Conflict::InviteAlreadyProcessed)?;

    Ok(invite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_is_eight_hex_chars() {
        let code = generate_invite_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_invite_codes_differ() {
        let codes: std::collections::HashSet<String> = (0..32).map(|_| generate_invite_code()).collect();
        assert!(codes.len() > 1);
    }
}
