use crate::state::AppState;
use crate::web::api::error::{ApiError, ApiJson};
use crate::web::api::middleware::AuthUser;
use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use marquee_common::models::movie::Genre;
use marquee_common::models::user::UserProfile;
use marquee_common::validation::validate_genres;
use marquee_db::UserRepo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize, Serialize)]
pub struct FavouriteGenres {
    pub favourite_genres: Vec<Genre>,
}

/// GET /users/profile
#[tracing::instrument(skip(state))]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let row = UserRepo::get_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(row.into_profile()?))
}

/// PUT /users/favourite-genres
#[tracing::instrument(skip(state, req))]
pub async fn update_favourite_genres(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    WithRejection(Json(req), _): ApiJson<FavouriteGenres>,
) -> Result<Json<FavouriteGenres>, ApiError> {
    validate_genres(&req.favourite_genres).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if !UserRepo::update_favourite_genres(&state.pool, user.user_id, &req.favourite_genres).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    Ok(Json(req))
}
