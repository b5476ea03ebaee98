use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

text_enum!(
    /// draft -> registration_open -> active -> completed
    HackathonStatus {
        Draft => "draft",
        RegistrationOpen => "registration_open",
        Active => "active",
        Completed => "completed",
    }
);

impl HackathonStatus {
    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: HackathonStatus) -> bool {
        use HackathonStatus::*;

        matches!(
            (self, next),
            (Draft, RegistrationOpen) | (RegistrationOpen, Active) | (Active, Completed)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub hackathon_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: HackathonStatus,
    pub team_size: i32,
    /// 0 means unlimited
    pub max_teams: i32,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "registration_open".parse::<HackathonStatus>(),
            Ok(HackathonStatus::RegistrationOpen)
        );
        assert!("open".parse::<HackathonStatus>().is_err());
    }

    #[test]
    fn test_lifecycle_is_forward_only() {
        assert!(HackathonStatus::Draft.can_transition_to(HackathonStatus::RegistrationOpen));
        assert!(HackathonStatus::Active.can_transition_to(HackathonStatus::Completed));
        assert!(!HackathonStatus::Completed.can_transition_to(HackathonStatus::Active));
        assert!(!HackathonStatus::Draft.can_transition_to(HackathonStatus::Active));
    }
}
