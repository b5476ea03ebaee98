use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use super::membership::{is_teamed_in, lock_user};
use super::notifications::{NotificationEvent, Notifier};
use crate::error::{Conflict, Result};
use crate::models::{Match, Swipe, SwipeAction, SwiperIdentity, Team, TeamInvite, User};
use crate::repository::{TeamRepository, UserRepository};

/// What a single swipe produced
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    /// Set only when this swipe created the match
    pub matched: Option<(Match, User)>,
    pub invite: Option<TeamInvite>,
}

/// Swipe ledger and match detection
pub struct SwipeService<'a> {
    pool: &'a PgPool,
    notifier: &'a Notifier,
}

impl<'a> SwipeService<'a> {
    pub fn new(pool: &'a PgPool, notifier: &'a Notifier) -> Self {
        Self { pool, notifier }
    }

    /// Record a like/pass from `actor_id` toward `target_user_id`.
    ///
    /// Captains swipe on behalf of their team. A like that meets an earlier like from the
    /// target creates exactly one match; a captain's like also invites the target to the team.
    pub async fn record_swipe(
        &self,
        actor_id: Uuid,
        target_user_id: Uuid,
        action: SwipeAction,
    ) -> Result<SwipeOutcome> {
        if actor_id == target_user_id {
            return Err(Conflict::CannotSwipeSelf.into());
        }

        let users = UserRepository::new(self.pool);
        let actor = users.find_by_id(actor_id).await?;
        let target = users.find_by_id(target_user_id).await?;
        let hackathon_id = actor.current_hackathon_id.ok_or(Conflict::NotRegistered)?;

        let team = TeamRepository::new(self.pool)
            .find_captained(actor_id, hackathon_id)
            .await?;
        let swiper = SwiperIdentity::resolve(actor_id, team.as_ref().map(|t| t.team_id));

        let mut tx = self.pool.begin().await?;
        lock_user_pair(&mut tx, actor_id, target_user_id).await?;

        // Team before user, the order membership writers lock in
        let locked_target = match (&team, action) {
            (Some(team), SwipeAction::Like) => {
                share_team(&mut tx, team.team_id).await?;
                Some(lock_user(&mut tx, target_user_id).await?)
            }
            _ => None,
        };

        let swipe = insert_swipe(&mut tx, swiper, actor_id, target_user_id, action)
            .await?
            .ok_or(Conflict::DuplicateSwipe)?;

        let mut matched = None;
        let mut invite = None;

        if action == SwipeAction::Like {
            if has_liked(&mut tx, target_user_id, actor_id).await? {
                matched = insert_match(&mut tx, swiper, actor_id, target_user_id).await?;
            }

            if let (Some(team), Some(target)) = (&team, &locked_target)
                && target.team_id.is_none()
                && !is_teamed_in(&mut tx, target_user_id, team.hackathon_id).await?
            {
                invite = insert_pending_invite(&mut tx, team.team_id, target_user_id, actor_id).await?;
            }
        }

        tx.commit().await?;

        info!(
            swiper = ?swiper,
            target = %target_user_id,
            action = %action,
            matched = matched.is_some(),
            invite_sent = invite.is_some(),
            "swipe recorded"
        );

        if let Some(m) = &matched {
            self.notifier.send(NotificationEvent::matched(target.user_id, m.match_id, actor.user_id, &actor.name));
            self.notifier.send(NotificationEvent::matched(actor.user_id, m.match_id, target.user_id, &target.name));
        }

        if let (Some(invite), Some(team)) = (&invite, &team) {
            self.notify_invite(invite, team, &actor);
        }

        Ok(SwipeOutcome {
            swipe,
            matched: matched.map(|m| (m, target)),
            invite,
        })
    }

    fn notify_invite(&self, invite: &TeamInvite, team: &Team, inviter: &User) {
        self.notifier.send(NotificationEvent::team_invite(
            invite.invited_user_id,
            invite.invite_id,
            team.team_id,
            &team.name,
            &inviter.name,
        ));
    }
}

/// Serializes every swipe between two users, in either direction, for the rest of the transaction
async fn lock_user_pair(conn: &mut PgConnection, a: Uuid, b: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        SELECT pg_advisory_xact_lock(
            hashtextextended(LEAST($1::uuid, $2::uuid)::text || ':' || GREATEST($1::uuid, $2::uuid)::text, 0)
        )
        "#,
    )
    .bind(a)
    .bind(b)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Blocks membership changes on the team until the transaction ends
async fn share_team(conn: &mut PgConnection, team_id: Uuid) -> Result<()> {
    sqlx::query("SELECT 1 FROM teams WHERE team_id = $1 FOR SHARE")
        .bind(team_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// `None` when this swiper already has a decision on record for the target
async fn insert_swipe(
    conn: &mut PgConnection,
    swiper: SwiperIdentity,
    actor_id: Uuid,
    target_user_id: Uuid,
    action: SwipeAction,
) -> Result<Option<Swipe>> {
    let swipe = sqlx::query_as::<_, Swipe>(
        r#"
        INSERT INTO swipes (swiper_kind, swiper_id, actor_id, target_user_id, action)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (swiper_id, target_user_id) DO NOTHING
        RETURNING swipe_id, swiper_kind, swiper_id, actor_id, target_user_id, action, created_at
        "#,
    )
    .bind(swiper.kind().as_str())
    .bind(swiper.id())
    .bind(actor_id)
    .bind(target_user_id)
    .bind(action.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    Ok(swipe)
}

/// Whether `swiper_id` has liked `target_user_id`
async fn has_liked(conn: &mut PgConnection, swiper_id: Uuid, target_user_id: Uuid) -> Result<bool> {
    let liked = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM swipes
            WHERE swiper_id = $1 AND target_user_id = $2 AND action = 'like'
        )
        "#,
    )
    .bind(swiper_id)
    .bind(target_user_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(liked)
}

/// `None` when the pair already has a match
async fn insert_match(
    conn: &mut PgConnection,
    swiper: SwiperIdentity,
    initiator_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Match>> {
    let created = sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (swiper_kind, swiper_id, initiator_id, user_id)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT DO NOTHING
        RETURNING match_id, swiper_kind, swiper_id, initiator_id, user_id, created_at
        "#,
    )
    .bind(swiper.kind().as_str())
    .bind(swiper.id())
    .bind(initiator_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(created)
}

/// `None` when the team already has a pending invite out to the user
pub(crate) async fn insert_pending_invite(
    conn: &mut PgConnection,
    team_id: Uuid,
    invited_user_id: Uuid,
    inviter_id: Uuid,
) -> Result<Option<TeamInvite>> {
    let invite = sqlx::query_as::<_, TeamInvite>(
        r#"
        INSERT INTO team_invites (team_id, invited_user_id, inviter_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (team_id, invited_user_id) WHERE status = 'pending' DO NOTHING
        RETURNING invite_id, team_id, invited_user_id, inviter_id, status, created_at, updated_at
        "#,
    )
    .bind(team_id)
    .bind(invited_user_id)
    .bind(inviter_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(invite)
}
