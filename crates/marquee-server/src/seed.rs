use crate::auth::hash_password;
use crate::config::InitialAdminConfig;
use anyhow::{Context, Result};
use marquee_common::models::auth::Role;
use marquee_db::{NewUser, UserRepo};
use sqlx::PgPool;
use uuid::Uuid;

/// Create the configured admin account unless the email is already taken.
/// Returns `true` when a new account was inserted.
pub async fn seed_initial_admin(pool: &PgPool, admin: &InitialAdminConfig) -> Result<bool> {
    if UserRepo::get_by_email(pool, &admin.email)
        .await
        .context("Failed to check for initial admin")?
        .is_some()
    {
        tracing::info!(
            "Initial admin '{}' already exists, skipping seed",
            admin.email
        );
        return Ok(false);
    }

    let password_hash =
        hash_password(&admin.password).context("Failed to hash initial admin password")?;
    let user = NewUser {
        user_id: Uuid::new_v4(),
        first_name: admin.first_name.clone(),
        last_name: admin.last_name.clone(),
        email: admin.email.clone(),
        password_hash,
        role: Role::Admin,
        favourite_genres: Vec::new(),
    };

    let created = UserRepo::create(pool, &user)
        .await
        .context("Failed to create initial admin")?;
    if created {
        tracing::info!("Created initial admin: {}", admin.email);
    } else {
        tracing::info!(
            "Initial admin '{}' was created concurrently, skipping seed",
            admin.email
        );
    }
    Ok(created)
}
