pub mod genre;
pub mod movie;
pub mod ranking;
pub mod user;
