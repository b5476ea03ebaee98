use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::swipe::{SwiperIdentity, SwiperKind};

/// A reciprocal like. `swiper_id` is whatever identity liked second
/// (team id for captains), `user_id` is the liked user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub match_id: Uuid,
    #[sqlx(try_from = "String")]
    pub swiper_kind: SwiperKind,
    pub swiper_id: Uuid,
    pub initiator_id: Uuid,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
}

impl Match {
    pub fn swiper(&self) -> SwiperIdentity {
        SwiperIdentity::from_parts(self.swiper_kind, self.swiper_id)
    }

    /// The other human in the match, seen from `user_id`
    pub fn counterpart_of(&self, user_id: Uuid) -> Uuid {
        if self.user_id == user_id {
            self.initiator_id
        } else {
            self.user_id
        }
    }
}
