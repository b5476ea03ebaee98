pub mod customization;
pub mod hackathon;
pub mod invite;
pub mod join_request;
pub mod matching;
pub mod notification;
pub mod preference;
pub mod swipe;
pub mod team;
pub mod user;

pub use customization::CustomizationRepository;
pub use hackathon::HackathonRepository;
pub use invite::InviteRepository;
pub use join_request::JoinRequestRepository;
pub use matching::MatchRepository;
pub use notification::NotificationRepository;
pub use preference::PreferenceRepository;
pub use swipe::SwipeRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
