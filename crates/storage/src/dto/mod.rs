pub mod balance;
pub mod common;
pub mod hackathon;
pub mod invite;
pub mod swipe;
pub mod team;
pub mod user;
