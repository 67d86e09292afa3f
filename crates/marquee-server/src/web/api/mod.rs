pub mod admin;
pub mod auth;
pub mod error;
pub mod genres;
pub mod middleware;
pub mod movies;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// GET /hello -- liveness probe
async fn hello() -> &'static str {
    "Hello, Marquee!"
}

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/hello", get(hello))
        // Catalog
        .route("/movies", get(movies::list_movies).post(movies::add_movie))
        .route("/movies/recommended", get(movies::recommended_movies))
        .route("/movies/{imdb_id}", get(movies::get_movie))
        .route("/genres", get(genres::list_genres))
        // Admin
        .route(
            "/admin/movies/{imdb_id}/review",
            put(admin::review_movie),
        )
        // Accounts
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/users/refresh-token", post(auth::refresh_token))
        .route("/users/logout", post(auth::logout))
        .route("/users/profile", get(users::profile))
        .route("/users/favourite-genres", put(users::update_favourite_genres))
        .with_state(state)
}
