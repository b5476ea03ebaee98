pub mod hackathons;
pub mod membership;
pub mod notifications;
pub mod recommendations;
pub mod swipes;
pub mod team_balance;

pub use membership::MembershipService;
pub use notifications::{NotificationEvent, Notifier};
pub use swipes::{SwipeOutcome, SwipeService};
