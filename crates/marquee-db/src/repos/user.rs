use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use marquee_common::models::auth::Role;
use marquee_common::models::movie::Genre;
use marquee_common::models::user::UserProfile;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub favourite_genres: Json<Vec<Genre>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn role(&self) -> Result<Role> {
        self.role.parse()
    }

    pub fn into_profile(self) -> Result<UserProfile> {
        let role = self.role()?;
        Ok(UserProfile {
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role,
            favourite_genres: self.favourite_genres.0,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub favourite_genres: Vec<Genre>,
}

const USER_COLUMNS: &str = r#"user_id, first_name, last_name, email, password_hash, role, favourite_genres, created_at, updated_at"#;

pub struct UserRepo;

impl UserRepo {
    /// Insert a user. Returns `false` when the email is already registered;
    /// the unique index makes this race-free.
    pub async fn create(pool: &PgPool, user: &NewUser) -> Result<bool> {
        let result = sqlx::query(
            r#"INSERT INTO "user" (user_id, first_name, last_name, email, password_hash, role, favourite_genres)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (email) DO NOTHING"#,
        )
        .bind(user.user_id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(Json(&user.favourite_genres))
        .execute(pool)
        .await
        .context("Failed to create user")?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by email")?;
        Ok(row)
    }

    pub async fn get_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE user_id = $1"#
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by id")?;
        Ok(row)
    }

    pub async fn count_by_email(pool: &PgPool, email: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM "user" WHERE email = $1"#)
            .bind(email)
            .fetch_one(pool)
            .await
            .context("Failed to count users by email")?;
        Ok(count)
    }

    /// Genre names the user prefers; empty when the user does not exist.
    pub async fn favourite_genre_names(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>> {
        let row: Option<(Json<Vec<Genre>>,)> =
            sqlx::query_as(r#"SELECT favourite_genres FROM "user" WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_optional(pool)
                .await
                .context("Failed to get favourite genres")?;
        Ok(row
            .map(|(genres,)| genres.0.into_iter().map(|g| g.genre_name).collect())
            .unwrap_or_default())
    }

    /// Returns `false` when no user has this id.
    pub async fn update_favourite_genres(
        pool: &PgPool,
        user_id: Uuid,
        genres: &[Genre],
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"UPDATE "user" SET favourite_genres = $2, updated_at = NOW() WHERE user_id = $1"#,
        )
        .bind(user_id)
        .bind(Json(genres))
        .execute(pool)
        .await
        .context("Failed to update favourite genres")?;
        Ok(result.rows_affected() > 0)
    }
}
