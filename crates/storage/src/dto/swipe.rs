use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::user::UserSummary;
use crate::models::{SwipeAction, SwiperIdentity};

/// Request payload for a like/pass decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub target_user_id: Uuid,

    /// "like" or "pass"
    #[validate(custom(function = "validate_action"))]
    pub action: String,
}

impl SwipeRequest {
    /// Parsed action; call after `validate()`
    pub fn action(&self) -> Result<SwipeAction, String> {
        self.action.parse()
    }
}

fn validate_action(action: &str) -> Result<(), validator::ValidationError> {
    if action.parse::<SwipeAction>().is_ok() {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_action");
        err.message = Some("action must be 'like' or 'pass'".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwipeResponse {
    pub success: bool,
    pub action: SwipeAction,
    pub swiper: SwiperIdentity,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub invite_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_user: Option<UserSummary>,
}

/// Request payload for replacing the caller's swipe filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_mmr_range"))]
pub struct SwipePreferenceRequest {
    #[validate(range(min = 0))]
    pub min_mmr: Option<i32>,

    #[validate(range(min = 0))]
    pub max_mmr: Option<i32>,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub preferred_skills: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub preferred_experience: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub preferred_roles: Vec<String>,

    #[serde(default)]
    pub verified_only: bool,
}

fn validate_mmr_range(req: &SwipePreferenceRequest) -> Result<(), validator::ValidationError> {
    if let (Some(min), Some(max)) = (req.min_mmr, req.max_mmr)
        && min > max
    {
        let mut err = validator::ValidationError::new("invalid_mmr_range");
        err.message = Some("minMmr must not exceed maxMmr".into());
        return Err(err);
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub swiper: SwiperIdentity,
    pub matched_at: NaiveDateTime,
    pub user: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_request_rejects_unknown_action() {
        let req = SwipeRequest {
            target_user_id: Uuid::new_v4(),
            action: "maybe".to_string(),
        };
        assert!(req.validate().is_err());
        assert!(req.action().is_err());
    }

    #[test]
    fn test_swipe_request_accepts_like() {
        let req: SwipeRequest = serde_json::from_value(serde_json::json!({
            "targetUserId": Uuid::nil(),
            "action": "like"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.action(), Ok(SwipeAction::Like));
    }

    #[test]
    fn test_preference_rejects_inverted_range() {
        let req = SwipePreferenceRequest {
            min_mmr: Some(1500),
            max_mmr: Some(1200),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = SwipePreferenceRequest {
            min_mmr: Some(1200),
            max_mmr: None,
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_match_flag_serializes_as_match() {
        let resp = SwipeResponse {
            success: true,
            action: SwipeAction::Like,
            swiper: SwiperIdentity::Solo(Uuid::nil()),
            is_match: true,
            invite_sent: false,
            invite_id: None,
            match_id: None,
            matched_user: None,
        };
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["match"], true);
        assert_eq!(json["inviteSent"], false);
        assert!(json.get("inviteId").is_none());
    }
}
