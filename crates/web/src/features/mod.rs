pub mod hackathons;
pub mod health;
pub mod invites;
pub mod matches;
pub mod notifications;
pub mod recommendations;
pub mod swipes;
pub mod teams;
