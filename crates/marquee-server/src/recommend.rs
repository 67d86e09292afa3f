use anyhow::Result;
use marquee_common::models::movie::Movie;
use marquee_db::{MovieRepo, UserRepo};
use sqlx::PgPool;
use uuid::Uuid;

pub const DEFAULT_RECOMMENDATION_LIMIT: i64 = 5;

/// Parse the configured cap, falling back to the default when it is unset,
/// unparseable or not positive.
pub fn recommendation_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT)
}

/// Best-ranked movies in the user's favourite genres, at most `limit`.
///
/// A user with no stored preferences (or no user row at all) gets an empty
/// list rather than an error.
#[tracing::instrument(skip(pool))]
pub async fn recommend_for_user(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<Movie>> {
    let genres = UserRepo::favourite_genre_names(pool, user_id).await?;
    if genres.is_empty() {
        tracing::debug!("No favourite genres, nothing to recommend");
        return Ok(Vec::new());
    }
    MovieRepo::list_by_genres(pool, &genres, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_when_unset() {
        assert_eq!(recommendation_limit(None), 5);
    }

    #[test]
    fn test_limit_parses_configured_value() {
        assert_eq!(recommendation_limit(Some("10")), 10);
        assert_eq!(recommendation_limit(Some(" 3 ")), 3);
    }

    #[test]
    fn test_limit_falls_back_on_garbage() {
        assert_eq!(recommendation_limit(Some("")), 5);
        assert_eq!(recommendation_limit(Some("ten")), 5);
        assert_eq!(recommendation_limit(Some("2.5")), 5);
    }

    #[test]
    fn test_limit_falls_back_on_non_positive() {
        assert_eq!(recommendation_limit(Some("0")), 5);
        assert_eq!(recommendation_limit(Some("-4")), 5);
    }
}
