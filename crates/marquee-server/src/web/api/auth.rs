use crate::auth::{hash_password, verify_password, TokenPair};
use crate::state::AppState;
use crate::web::api::error::{ApiError, ApiJson};
use crate::web::api::middleware::AuthUser;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use marquee_common::models::auth::Role;
use marquee_common::models::movie::Genre;
use marquee_common::models::user::UserProfile;
use marquee_common::validation::{validate_login, validate_registration};
use marquee_db::{NewUser, UserRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub favourite_genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Profile plus a fresh token pair, returned on register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

const INVALID_LOGIN: &str = "Invalid email or password";

/// POST /users/register
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim();
    validate_registration(
        &req.first_name,
        &req.last_name,
        email,
        &req.password,
        &req.favourite_genres,
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let new_user = NewUser {
        user_id: Uuid::new_v4(),
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        email: email.to_string(),
        password_hash: hash_password(&req.password)?,
        role: Role::User,
        favourite_genres: req.favourite_genres,
    };

    if !UserRepo::create(&state.pool, &new_user).await? {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let tokens = state
        .tokens
        .issue_pair(&new_user.user_id.to_string(), new_user.role)?;
    tracing::info!(user_id = %new_user.user_id, "User registered");

    let profile = UserProfile {
        user_id: new_user.user_id,
        first_name: new_user.first_name,
        last_name: new_user.last_name,
        email: new_user.email,
        role: new_user.role,
        favourite_genres: new_user.favourite_genres,
    };
    Ok((StatusCode::CREATED, Json(AuthResponse { profile, tokens })))
}

/// POST /users/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = req.email.trim();
    validate_login(email, &req.password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = UserRepo::get_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_LOGIN.to_string()))?;

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.user_id, "Failed login attempt");
        return Err(ApiError::Unauthorized(INVALID_LOGIN.to_string()));
    }

    let profile = user.into_profile()?;
    let tokens = state
        .tokens
        .issue_pair(&profile.user_id.to_string(), profile.role)?;
    Ok(Json(AuthResponse { profile, tokens }))
}

/// POST /users/refresh-token
#[tracing::instrument(skip(state, req))]
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): ApiJson<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid or expired refresh token".to_string());

    let claims = state
        .tokens
        .validate_refresh(&req.refresh_token)
        .map_err(|_| invalid())?;
    let user_id = claims.sub.parse::<Uuid>().map_err(|_| invalid())?;

    if UserRepo::get_by_id(&state.pool, user_id).await?.is_none() {
        return Err(ApiError::Unauthorized("User not found".to_string()));
    }

    Ok(Json(state.tokens.issue_pair(&claims.sub, claims.role)?))
}

/// POST /users/logout
///
/// Tokens are stateless; the client discards them.
#[tracing::instrument(skip(_state))]
pub async fn logout(
    State(_state): State<Arc<AppState>>,
    user: AuthUser,
) -> Json<serde_json::Value> {
    tracing::info!(user_id = %user.user_id, "User logged out");
    Json(json!({"message": "Logged out successfully"}))
}
