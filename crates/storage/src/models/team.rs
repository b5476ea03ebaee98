use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::User;

text_enum!(TeamStatus {
    Looking => "looking",
    Ready => "ready",
    Closed => "closed",
});

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: Uuid,
    pub hackathon_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub captain_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: TeamStatus,
    pub invite_code: String,
    pub created_at: NaiveDateTime,
}

impl Team {
    pub fn is_captain(&self, user_id: Uuid) -> bool {
        self.captain_id == user_id
    }

    pub fn accepts_members(&self) -> bool {
        self.status != TeamStatus::Closed
    }

    /// Captain or seated member
    pub fn has_member(&self, user: &User) -> bool {
        self.is_captain(user.user_id) || user.team_id == Some(self.team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn team(captain_id: Uuid) -> Team {
        Team {
            team_id: Uuid::new_v4(),
            hackathon_id: Uuid::new_v4(),
            name: "Borrow Checkers".to_string(),
            description: None,
            captain_id,
            status: TeamStatus::Looking,
            invite_code: "0badc0de".to_string(),
            created_at: NaiveDateTime::default(),
        }
    }

    fn user(team_id: Option<Uuid>) -> User {
        User {
            user_id: Uuid::new_v4(),
            telegram_user_id: None,
            username: "ferris".to_string(),
            name: "Ferris".to_string(),
            bio: None,
            role: UserRole::User,
            skills: vec![],
            looking_for: vec![],
            verified_skills: vec![],
            experience: None,
            mmr: 1000,
            pts: 0,
            avatar_url: None,
            current_hackathon_id: None,
            team_id,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_has_member() {
        let captain = user(None);
        let team = team(captain.user_id);

        assert!(team.has_member(&captain));
        assert!(team.has_member(&user(Some(team.team_id))));
        assert!(!team.has_member(&user(None)));
        assert!(!team.has_member(&user(Some(Uuid::new_v4()))));
    }

    #[test]
    fn test_closed_team_rejects_members() {
        let mut team = team(Uuid::new_v4());
        assert!(team.accepts_members());
        team.status = TeamStatus::Closed;
        assert!(!team.accepts_members());
    }
}
