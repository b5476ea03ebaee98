use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

text_enum!(SwipeAction {
    Like => "like",
    Pass => "pass",
});

text_enum!(SwiperKind {
    Team => "team",
    Solo => "solo",
});

/// Who a like/pass is credited to: the captain's team, or the user acting alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SwiperIdentity {
    Team(Uuid),
    Solo(Uuid),
}

impl SwiperIdentity {
    /// Captains swipe on behalf of their team, everyone else swipes as themselves
    pub fn resolve(user_id: Uuid, captained_team: Option<Uuid>) -> Self {
        match captained_team {
            Some(team_id) => Self::Team(team_id),
            None => Self::Solo(user_id),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Team(id) | Self::Solo(id) => *id,
        }
    }

    pub fn kind(&self) -> SwiperKind {
        match self {
            Self::Team(_) => SwiperKind::Team,
            Self::Solo(_) => SwiperKind::Solo,
        }
    }

    pub fn team_id(&self) -> Option<Uuid> {
        match self {
            Self::Team(id) => Some(*id),
            Self::Solo(_) => None,
        }
    }

    pub fn from_parts(kind: SwiperKind, id: Uuid) -> Self {
        match kind {
            SwiperKind::Team => Self::Team(id),
            SwiperKind::Solo => Self::Solo(id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Swipe {
    pub swipe_id: Uuid,
    #[sqlx(try_from = "String")]
    pub swiper_kind: SwiperKind,
    pub swiper_id: Uuid,
    /// The user who actually pressed the button
    pub actor_id: Uuid,
    pub target_user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub action: SwipeAction,
    pub created_at: NaiveDateTime,
}

impl Swipe {
    pub fn swiper(&self) -> SwiperIdentity {
        SwiperIdentity::from_parts(self.swiper_kind, self.swiper_id)
    }
}
