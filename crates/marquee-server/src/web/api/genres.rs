use crate::state::AppState;
use crate::web::api::error::ApiError;
use axum::{extract::State, Json};
use marquee_common::models::movie::Genre;
use marquee_db::GenreRepo;
use std::sync::Arc;

/// GET /genres
#[tracing::instrument(skip(state))]
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Genre>>, ApiError> {
    Ok(Json(GenreRepo::list(&state.pool).await?))
}
