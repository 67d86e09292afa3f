use crate::state::AppState;
use crate::web::api::error::ApiError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use marquee_common::models::auth::Role;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of an authenticated caller, taken from a valid access token.
/// Handlers receive it by value; nothing is stashed on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// An [`AuthUser`] whose role is `ADMIN`.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header missing".to_string()))?;

    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(ApiError::Unauthorized(
            "Invalid authorization format".to_string(),
        )),
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let invalid = || ApiError::Unauthorized("Invalid or expired token".to_string());
        let claims = state.tokens.validate_access(token).map_err(|_| invalid())?;
        let user_id = claims.sub.parse::<Uuid>().map_err(|_| invalid())?;

        Ok(AuthUser {
            user_id,
            role: claims.role,
        })
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            tracing::warn!(user_id = %user.user_id, "Non-admin attempted admin route");
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenSecret;
    use crate::config::{AuthConfig, DbConfig, ServerConfig};
    use axum::http::Request;
    use axum::http::StatusCode;
    use marquee_common::models::auth::{Claims, TokenType};
    use sqlx::PgPool;

    const ACCESS: &str = "mw-access-secret";
    const REFRESH: &str = "mw-refresh-secret";

    fn test_state() -> Arc<AppState> {
        let config = ServerConfig {
            listen: "127.0.0.1:0".to_string(),
            db: DbConfig {
                url: "postgres://invalid:5432/db".to_string(),
                timeout_secs: 1,
            },
            auth: AuthConfig {
                jwt_secret: ACCESS.to_string(),
                refresh_secret: REFRESH.to_string(),
                initial_admin: None,
            },
            classifier: Default::default(),
            cors: Default::default(),
            recommended_movie_limit: None,
        };
        let pool = PgPool::connect_lazy("postgres://invalid:5432/db").unwrap();
        Arc::new(AppState::new(pool, config).unwrap())
    }

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/users/profile");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    async fn extract_user(authorization: Option<&str>) -> Result<AuthUser, ApiError> {
        AuthUser::from_request_parts(&mut parts(authorization), &test_state()).await
    }

    async fn extract_admin(authorization: Option<&str>) -> Result<AdminUser, ApiError> {
        AdminUser::from_request_parts(&mut parts(authorization), &test_state()).await
    }

    fn access_token(user_id: Uuid, role: Role) -> String {
        TokenSecret::<crate::auth::Access>::new(ACCESS)
            .issue(&user_id.to_string(), role)
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let err = extract_user(None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Authorization header missing");
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        for header in ["Basic abc", "Bearer", "Bearer ", "bearer abc", "Bearer a b"] {
            let err = extract_user(Some(header)).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED, "{header}");
        }
    }

    #[tokio::test]
    async fn test_valid_access_token_yields_context() {
        let user_id = Uuid::new_v4();
        let header = format!("Bearer {}", access_token(user_id, Role::User));
        let user = extract_user(Some(&header)).await.unwrap();
        assert_eq!(
            user,
            AuthUser {
                user_id,
                role: Role::User
            }
        );
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_accepted() {
        let token = TokenSecret::<crate::auth::Refresh>::new(REFRESH)
            .issue(&Uuid::new_v4().to_string(), Role::Admin)
            .unwrap();
        let err = extract_user(Some(&format!("Bearer {}", token)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let now = chrono::Utc::now().timestamp();
        let token = TokenSecret::<crate::auth::Access>::new(ACCESS)
            .sign(&Claims {
                sub: Uuid::new_v4().to_string(),
                role: Role::Admin,
                typ: TokenType::Access,
                iat: now - 1000,
                exp: now - 1,
            })
            .unwrap();
        let err = extract_user(Some(&format!("Bearer {}", token)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_uuid_subject_is_unauthorized() {
        let token = TokenSecret::<crate::auth::Access>::new(ACCESS)
            .issue("not-a-uuid", Role::User)
            .unwrap();
        let err = extract_user(Some(&format!("Bearer {}", token)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_gate_forbids_user_role() {
        let header = format!("Bearer {}", access_token(Uuid::new_v4(), Role::User));
        let err = extract_admin(Some(&header)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_gate_without_token_is_unauthorized() {
        let err = extract_admin(None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_gate_accepts_admin() {
        let user_id = Uuid::new_v4();
        let header = format!("Bearer {}", access_token(user_id, Role::Admin));
        let AdminUser(user) = extract_admin(Some(&header)).await.unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, Role::Admin);
    }
}
