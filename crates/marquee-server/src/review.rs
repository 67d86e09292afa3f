//! Admin review classification.
//!
//! The external call happens before anything is written: if it fails the
//! movie is left untouched. There is no retry, and a crash between the
//! classifier answering and the update landing loses the answer.

use crate::classifier::Classifier;
use marquee_common::models::movie::MovieRanking;
use marquee_common::ranking::RankingLookup;
use marquee_db::{MovieRepo, RankingRepo};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("{0}")]
    Invalid(String),

    #[error("Movie not found")]
    MovieNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub admin_review: String,
    pub ranking: MovieRanking,
}

/// Classify `review` and store it, with the resulting ranking, on the movie.
#[tracing::instrument(skip(pool, classifier, review))]
pub async fn classify_and_store(
    pool: &PgPool,
    classifier: &dyn Classifier,
    imdb_id: &str,
    review: &str,
) -> Result<ReviewOutcome, ReviewError> {
    if imdb_id.trim().is_empty() {
        return Err(ReviewError::Invalid("imdb_id is required".to_string()));
    }
    if review.trim().is_empty() {
        return Err(ReviewError::Invalid("admin_review is required".to_string()));
    }

    let lookup = RankingLookup::new(RankingRepo::list(pool).await?);
    if lookup.is_empty() {
        return Err(anyhow::anyhow!("No rankings configured").into());
    }
    let categories = lookup.active_names();

    let label = classifier.classify(&categories, review).await?;
    let ranking = lookup.resolve(&label);
    tracing::info!(
        label = %ranking.ranking_name,
        value = ranking.ranking_value,
        "Review classified"
    );

    if !MovieRepo::set_review(pool, imdb_id, review, &ranking).await? {
        return Err(ReviewError::MovieNotFound);
    }

    Ok(ReviewOutcome {
        admin_review: review.to_string(),
        ranking,
    })
}
