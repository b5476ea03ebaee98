use serde_json::{Value, json};
use sqlx::PgPool;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::NotificationKind;
use crate::repository::NotificationRepository;

/// A message for one user, persisted by the notification worker
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Value,
}

impl NotificationEvent {
    pub fn matched(user_id: Uuid, match_id: Uuid, counterpart_id: Uuid, counterpart_name: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Match,
            title: "New match!".to_string(),
            message: format!("{counterpart_name} wants to team up with you too!"),
            data: json!({
                "matchId": match_id,
                "fromUserId": counterpart_id,
                "fromUserName": counterpart_name,
            }),
        }
    }

    pub fn team_invite(user_id: Uuid, invite_id: Uuid, team_id: Uuid, team_name: &str, inviter_name: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::TeamInvite,
            title: "Team invite".to_string(),
            message: format!("{inviter_name} invited you to join team '{team_name}'"),
            data: json!({
                "inviteId": invite_id,
                "teamId": team_id,
                "teamName": team_name,
            }),
        }
    }

    pub fn join_request(captain_id: Uuid, request_id: Uuid, team_id: Uuid, team_name: &str, user_name: &str) -> Self {
        Self {
            user_id: captain_id,
            kind: NotificationKind::TeamRequest,
            title: "Join request".to_string(),
            message: format!("{user_name} wants to join your team '{team_name}'"),
            data: json!({
                "requestId": request_id,
                "teamId": team_id,
                "userName": user_name,
            }),
        }
    }

    pub fn accepted(user_id: Uuid, team_id: Uuid, team_name: &str, message: String) -> Self {
        Self {
            user_id,
            kind: NotificationKind::TeamAccepted,
            title: "Team update".to_string(),
            message,
            data: json!({ "teamId": team_id, "teamName": team_name }),
        }
    }

    pub fn rejected(user_id: Uuid, team_id: Uuid, team_name: &str, message: String) -> Self {
        Self {
            user_id,
            kind: NotificationKind::TeamRejected,
            title: "Team update".to_string(),
            message,
            data: json!({ "teamId": team_id, "teamName": team_name }),
        }
    }
}

/// Fire-and-forget handle to the notification worker. Sending never blocks and never fails the caller.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<NotificationEvent>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NotificationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Spawn the persisting worker on the current runtime
    pub fn spawn(pool: PgPool) -> Self {
        let (notifier, rx) = Self::channel();
        tokio::spawn(run_worker(pool, rx));
        notifier
    }

    pub fn send(&self, event: NotificationEvent) {
        let user_id = event.user_id;
        if self.tx.send(event).is_err() {
            warn!(%user_id, "notification worker is gone, dropping event");
        }
    }
}

pub async fn run_worker(pool: PgPool, mut rx: mpsc::UnboundedReceiver<NotificationEvent>) {
    let repo = NotificationRepository::new(&pool);
    while let Some(event) = rx.recv().await {
        match repo.create(&event).await {
            Ok(notification) => debug!(
                notification_id = %notification.notification_id,
                kind = %event.kind,
                "notification stored"
            ),
            Err(e) => warn!(user_id = %event.user_id, kind = %event.kind, "failed to store notification: {e}"),
        }
    }
    debug!("notification worker stopped");
}
