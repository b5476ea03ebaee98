/// Declares a closed set of values stored as TEXT in Postgres.
///
/// Rows decode through `#[sqlx(try_from = "String")]`, writes bind `as_str()`.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            ::serde::Serialize, ::serde::Deserialize, ::utoipa::ToSchema,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!("invalid {} value: {}", stringify!($name), other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod customization;
pub mod hackathon;
pub mod hackathon_participant;
pub mod invite;
pub mod join_request;
pub mod matching;
pub mod notification;
pub mod swipe;
pub mod swipe_preference;
pub mod team;
pub mod user;

pub use customization::CustomizationItem;
pub use hackathon::{Hackathon, HackathonStatus};
pub use hackathon_participant::{HackathonParticipant, ParticipantStatus};
pub use invite::{InviteStatus, TeamInvite};
pub use join_request::{JoinRequestStatus, TeamJoinRequest};
pub use matching::Match;
pub use notification::{Notification, NotificationKind};
pub use swipe::{Swipe, SwipeAction, SwiperIdentity, SwiperKind};
pub use swipe_preference::SwipePreference;
pub use team::{Team, TeamStatus};
pub use user::{User, UserRole};
