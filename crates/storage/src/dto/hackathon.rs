use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{HackathonParticipant, HackathonStatus};

/// Request payload for creating a hackathon (admin only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_schedule"))]
pub struct CreateHackathonRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default = "default_team_size")]
    #[validate(range(min = 1, max = 20, message = "Team size must be between 1 and 20"))]
    pub team_size: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_teams: i32,

    pub starts_at: Option<NaiveDateTime>,

    pub ends_at: Option<NaiveDateTime>,
}

fn default_team_size() -> i32 {
    4
}

fn validate_schedule(req: &CreateHackathonRequest) -> Result<(), validator::ValidationError> {
    if let (Some(start), Some(end)) = (req.starts_at, req.ends_at)
        && end < start
    {
        let mut err = validator::ValidationError::new("invalid_schedule");
        err.message = Some("endsAt must be on or after startsAt".into());
        return Err(err);
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHackathonStatusRequest {
    pub status: HackathonStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub message: String,
    pub participant: HackathonParticipant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_size_defaults_to_four() {
        let req: CreateHackathonRequest =
            serde_json::from_value(serde_json::json!({ "name": "Spring Jam" })).unwrap();
        assert_eq!(req.team_size, 4);
        assert_eq!(req.max_teams, 0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_team_size() {
        let req: CreateHackathonRequest =
            serde_json::from_value(serde_json::json!({ "name": "Jam", "teamSize": 0 })).unwrap();
        assert!(req.validate().is_err());
    }
}
