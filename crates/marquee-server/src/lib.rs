pub mod auth;
pub mod classifier;
pub mod config;
pub mod recommend;
pub mod review;
pub mod seed;
pub mod state;
pub mod web;
