use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a PostgreSQL connection pool.
///
/// `timeout` bounds both waiting for a connection and every statement run on
/// it (`statement_timeout`), so no single call can outlive it.
pub async fn create_pool(database_url: &str, timeout: Duration) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(database_url)
        .context("Invalid database URL")?
        .options([("statement_timeout", timeout.as_millis().to_string())]);
    let pool = PgPoolOptions::new()
        .acquire_timeout(timeout)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
