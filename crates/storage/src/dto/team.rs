use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::user::UserSummary;
use crate::models::{JoinRequestStatus, Team, TeamStatus};

/// Request payload for creating a team; the caller becomes captain
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub hackathon_id: Uuid,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinByCodeRequest {
    #[validate(length(min = 1, max = 32, message = "Code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KickMemberRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamStatusRequest {
    pub status: TeamStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJoinRequest {
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

/// Team with its roster. The invite code is only visible to people on the team.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub hackathon_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: TeamStatus,
    pub captain_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub captain: Option<UserSummary>,
    pub members: Vec<UserSummary>,
    pub member_count: usize,
    pub max_members: i32,
    pub created_at: NaiveDateTime,
}

impl TeamResponse {
    /// `members` must already include the captain
    pub fn new(team: Team, members: Vec<UserSummary>, max_members: i32, viewer: Uuid) -> Self {
        let on_team = members.iter().any(|m| m.user_id == viewer);
        let captain = members
            .iter()
            .find(|m| m.user_id == team.captain_id)
            .cloned();

        Self {
            team_id: team.team_id,
            hackathon_id: team.hackathon_id,
            name: team.name,
            description: team.description,
            status: team.status,
            captain_id: team.captain_id,
            invite_code: on_team.then_some(team.invite_code),
            captain,
            member_count: members.len(),
            members,
            max_members,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteCodeResponse {
    pub team_id: Uuid,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamResponse {
    pub message: String,
    pub team: TeamResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestResponse {
    pub request_id: Uuid,
    pub team_id: Uuid,
    pub team_name: String,
    pub status: JoinRequestStatus,
    pub message: Option<String>,
    pub user: UserSummary,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityQuery {
    pub candidate_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: Uuid) -> UserSummary {
        UserSummary {
            user_id: id,
            name: "n".into(),
            username: "u".into(),
            avatar_url: None,
            skills: vec![],
            mmr: 1000,
        }
    }

    fn team(captain: Uuid) -> Team {
        Team {
            team_id: Uuid::new_v4(),
            hackathon_id: Uuid::new_v4(),
            name: "Rustaceans".into(),
            description: None,
            captain_id: captain,
            status: TeamStatus::Looking,
            invite_code: "deadbeef".into(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_invite_code_hidden_from_outsiders() {
        let captain = Uuid::new_v4();
        let resp = TeamResponse::new(team(captain), vec![summary(captain)], 4, Uuid::new_v4());
        assert!(resp.invite_code.is_none());
        assert_eq!(resp.member_count, 1);
        assert_eq!(resp.captain.map(|c| c.user_id), Some(captain));
    }

    #[test]
    fn test_invite_code_visible_to_members() {
        let captain = Uuid::new_v4();
        let member = Uuid::new_v4();
        let resp = TeamResponse::new(
            team(captain),
            vec![summary(captain), summary(member)],
            4,
            member,
        );
        assert_eq!(resp.invite_code.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_create_team_requires_name() {
        let req = CreateTeamRequest {
            name: String::new(),
            hackathon_id: Uuid::new_v4(),
            description: None,
        };
        assert!(req.validate().is_err());
    }
}
