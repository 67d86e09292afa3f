use anyhow::{Context, Result};
use marquee_common::models::movie::{Genre, Movie, MovieRanking};
use sqlx::types::Json;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRow {
    pub imdb_id: String,
    pub title: String,
    pub poster_path: String,
    pub youtube_id: String,
    pub genres: Json<Vec<Genre>>,
    pub admin_review: Option<String>,
    pub ranking_name: Option<String>,
    pub ranking_value: Option<i32>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        let ranking = match (row.ranking_name, row.ranking_value) {
            (Some(ranking_name), Some(ranking_value)) => Some(MovieRanking {
                ranking_name,
                ranking_value,
            }),
            _ => None,
        };
        Movie {
            imdb_id: row.imdb_id,
            title: row.title,
            poster_path: row.poster_path,
            youtube_id: row.youtube_id,
            genres: row.genres.0,
            admin_review: row.admin_review,
            ranking,
        }
    }
}

const MOVIE_COLUMNS: &str =
    "imdb_id, title, poster_path, youtube_id, genres, admin_review, ranking_name, ranking_value";

pub struct MovieRepo;

impl MovieRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movie ORDER BY created_at, imdb_id"
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list movies")?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(pool: &PgPool, imdb_id: &str) -> Result<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movie WHERE imdb_id = $1"
        ))
        .bind(imdb_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get movie")?;
        Ok(row.map(Movie::from))
    }

    /// Insert a movie. Returns `false` when the imdb_id is already taken.
    pub async fn create(pool: &PgPool, movie: &Movie) -> Result<bool> {
        let (ranking_name, ranking_value) = match &movie.ranking {
            Some(r) => (Some(r.ranking_name.as_str()), Some(r.ranking_value)),
            None => (None, None),
        };
        let result = sqlx::query(
            r#"INSERT INTO movie (imdb_id, title, poster_path, youtube_id, genres, admin_review, ranking_name, ranking_value)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT (imdb_id) DO NOTHING"#,
        )
        .bind(&movie.imdb_id)
        .bind(&movie.title)
        .bind(&movie.poster_path)
        .bind(&movie.youtube_id)
        .bind(Json(&movie.genres))
        .bind(movie.admin_review.as_deref())
        .bind(ranking_name)
        .bind(ranking_value)
        .execute(pool)
        .await
        .context("Failed to create movie")?;
        Ok(result.rows_affected() == 1)
    }

    /// Store an admin review and its ranking in a single-row update.
    /// Returns `false` when no movie has this imdb_id.
    pub async fn set_review(
        pool: &PgPool,
        imdb_id: &str,
        admin_review: &str,
        ranking: &MovieRanking,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"UPDATE movie
               SET admin_review = $2, ranking_name = $3, ranking_value = $4, updated_at = NOW()
               WHERE imdb_id = $1"#,
        )
        .bind(imdb_id)
        .bind(admin_review)
        .bind(&ranking.ranking_name)
        .bind(ranking.ranking_value)
        .execute(pool)
        .await
        .context("Failed to store movie review")?;
        Ok(result.rows_affected() > 0)
    }

    /// Movies sharing at least one genre name with `genre_names`, best ranked
    /// first (lowest value), unranked movies last.
    pub async fn list_by_genres(
        pool: &PgPool,
        genre_names: &[String],
        limit: i64,
    ) -> Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            r#"SELECT {MOVIE_COLUMNS} FROM movie
               WHERE EXISTS (
                   SELECT 1 FROM jsonb_array_elements(genres) AS g
                   WHERE g->>'genre_name' = ANY($1)
               )
               ORDER BY ranking_value ASC NULLS LAST, imdb_id ASC
               LIMIT $2"#
        ))
        .bind(genre_names)
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("Failed to list movies by genre")?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }
}
