use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{CustomizationItem, User};

/// Minimal user card embedded in team, match and invite payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: Uuid,
    pub name: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub skills: Vec<String>,
    pub mmr: i32,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            skills: user.skills.clone(),
            mmr: user.mmr,
        }
    }
}

/// Equipped cosmetics shown on a swipe card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquippedCosmetics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<CustomizationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_color: Option<CustomizationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_frame: Option<CustomizationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<CustomizationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<CustomizationItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<CustomizationItem>,
}

impl EquippedCosmetics {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Public profile of a recommended teammate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub user_id: Uuid,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub verified_skills: Vec<String>,
    pub experience: Option<String>,
    pub looking_for: Vec<String>,
    pub avatar_url: Option<String>,
    pub mmr: i32,
    pub pts: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<EquippedCosmetics>,
}

impl CandidateResponse {
    pub fn new(user: User, cosmetics: Option<EquippedCosmetics>) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            username: user.username,
            bio: user.bio,
            skills: user.skills,
            verified_skills: user.verified_skills,
            experience: user.experience,
            looking_for: user.looking_for,
            avatar_url: user.avatar_url,
            mmr: user.mmr,
            pts: user.pts,
            customization: cosmetics.filter(|c| !c.is_empty()),
        }
    }
}
