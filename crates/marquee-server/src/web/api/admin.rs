use crate::review::{classify_and_store, ReviewOutcome};
use crate::state::AppState;
use crate::web::api::error::{ApiError, ApiJson};
use crate::web::api::middleware::AdminUser;
use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub admin_review: String,
}

/// PUT /admin/movies/{imdb_id}/review
#[tracing::instrument(skip(state, req))]
pub async fn review_movie(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(imdb_id): Path<String>,
    WithRejection(Json(req), _): ApiJson<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    let outcome = classify_and_store(
        &state.pool,
        state.classifier.as_ref(),
        &imdb_id,
        &req.admin_review,
    )
    .await?;
    tracing::info!(%imdb_id, reviewer = %admin.user_id, "Admin review stored");
    Ok(Json(outcome))
}
