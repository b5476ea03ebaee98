use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{invite::InviteResponse, user::UserSummary},
    error::Result,
    models::User,
    repository::{InviteRepository, UserRepository, invite::InviteWithTeam},
};
use uuid::Uuid;

pub async fn list_incoming(pool: &PgPool, user_id: Uuid) -> Result<Vec<InviteResponse>> {
    let invites = InviteRepository::new(pool).list_incoming(user_id).await?;
    invite_responses(pool, invites).await
}

pub async fn list_outgoing(pool: &PgPool, user_id: Uuid) -> Result<Vec<InviteResponse>> {
    let invites = InviteRepository::new(pool).list_outgoing(user_id).await?;
    invite_responses(pool, invites).await
}

async fn invite_responses(pool: &PgPool, invites: Vec<InviteWithTeam>) -> Result<Vec<InviteResponse>> {
    let mut ids: Vec<Uuid> = invites
        .iter()
        .flat_map(|i| [i.invite.inviter_id, i.invite.invited_user_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let users: HashMap<Uuid, User> = UserRepository::new(pool)
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    Ok(invites
        .into_iter()
        .filter_map(|i| {
            let inviter = users.get(&i.invite.inviter_id)?;
            let invited = users.get(&i.invite.invited_user_id)?;
            Some(InviteResponse {
                invite_id: i.invite.invite_id,
                team_id: i.invite.team_id,
                team_name: i.team_name,
                status: i.invite.status,
                inviter: UserSummary::from(inviter),
                invited_user: UserSummary::from(invited),
                created_at: i.invite.created_at,
            })
        })
        .collect())
}
