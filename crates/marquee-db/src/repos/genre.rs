use anyhow::{Context, Result};
use marquee_common::models::movie::Genre;
use sqlx::PgPool;

pub struct GenreRepo;

impl GenreRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Genre>> {
        let rows: Vec<(i32, String)> =
            sqlx::query_as("SELECT genre_id, genre_name FROM genre ORDER BY genre_id")
                .fetch_all(pool)
                .await
                .context("Failed to list genres")?;
        Ok(rows
            .into_iter()
            .map(|(genre_id, genre_name)| Genre {
                genre_id,
                genre_name,
            })
            .collect())
    }
}
