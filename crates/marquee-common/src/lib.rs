pub mod models;
pub mod ranking;
pub mod validation;
