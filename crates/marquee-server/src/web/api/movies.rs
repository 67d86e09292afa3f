use crate::recommend::recommend_for_user;
use crate::state::AppState;
use crate::web::api::error::{ApiError, ApiJson};
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use marquee_common::models::movie::{Genre, Movie};
use marquee_common::validation::validate_movie;
use marquee_db::MovieRepo;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// GET /movies
#[tracing::instrument(skip(state))]
pub async fn list_movies(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(json!({
        "count": movies.len(),
        "data": movies,
    })))
}

/// GET /movies/{imdb_id}
#[tracing::instrument(skip(state))]
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    MovieRepo::get(&state.pool, &imdb_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))
}

/// Body of `POST /movies`. Reviews and rankings are only ever set by the
/// admin review workflow, so they are not accepted here.
#[derive(Debug, Deserialize)]
pub struct AddMovieRequest {
    pub imdb_id: String,
    pub title: String,
    pub poster_path: String,
    pub youtube_id: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl From<AddMovieRequest> for Movie {
    fn from(req: AddMovieRequest) -> Self {
        Movie {
            imdb_id: req.imdb_id,
            title: req.title,
            poster_path: req.poster_path,
            youtube_id: req.youtube_id,
            genres: req.genres,
            admin_review: None,
            ranking: None,
        }
    }
}

/// POST /movies
#[tracing::instrument(skip(state, req))]
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    WithRejection(Json(req), _): ApiJson<AddMovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = Movie::from(req);
    validate_movie(&movie).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if !MovieRepo::create(&state.pool, &movie).await? {
        return Err(ApiError::Conflict(format!(
            "Movie '{}' already exists",
            movie.imdb_id
        )));
    }

    tracing::info!(imdb_id = %movie.imdb_id, added_by = %user.user_id, "Movie added");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "imdb_id": movie.imdb_id })),
    ))
}

/// GET /movies/recommended
#[tracing::instrument(skip(state))]
pub async fn recommended_movies(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies =
        recommend_for_user(&state.pool, user.user_id, state.recommendation_limit()).await?;
    Ok(Json(movies))
}
