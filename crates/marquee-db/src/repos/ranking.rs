use anyhow::{Context, Result};
use marquee_common::models::movie::Ranking;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankingRow {
    pub ranking_id: i64,
    pub ranking_name: String,
    pub ranking_value: i32,
    pub unranked: bool,
}

impl From<RankingRow> for Ranking {
    fn from(row: RankingRow) -> Self {
        Ranking {
            ranking_name: row.ranking_name,
            ranking_value: row.ranking_value,
            unranked: row.unranked,
        }
    }
}

pub struct RankingRepo;

impl RankingRepo {
    /// All rankings in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ranking>> {
        let rows = sqlx::query_as::<_, RankingRow>(
            "SELECT ranking_id, ranking_name, ranking_value, unranked FROM ranking ORDER BY ranking_id",
        )
        .fetch_all(pool)
        .await
        .context("Failed to list rankings")?;
        Ok(rows.into_iter().map(Ranking::from).collect())
    }

    pub async fn create(pool: &PgPool, ranking: &Ranking) -> Result<()> {
        sqlx::query(
            "INSERT INTO ranking (ranking_name, ranking_value, unranked) VALUES ($1, $2, $3)",
        )
        .bind(&ranking.ranking_name)
        .bind(ranking.ranking_value)
        .bind(ranking.unranked)
        .execute(pool)
        .await
        .context("Failed to create ranking")?;
        Ok(())
    }

    pub async fn delete_all(pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM ranking")
            .execute(pool)
            .await
            .context("Failed to delete rankings")?;
        Ok(())
    }
}
