use anyhow::{bail, Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use marquee_common::models::auth::{Claims, Role, TokenType};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Any signature, structure, expiry or token-type failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid credential")]
pub struct InvalidCredential;

/// A class of token with its own secret and lifetime.
pub trait TokenKind {
    const TYPE: TokenType;
    const TTL_SECS: i64;
}

#[derive(Debug, Clone, Copy)]
pub enum Access {}

#[derive(Debug, Clone, Copy)]
pub enum Refresh {}

impl TokenKind for Access {
    const TYPE: TokenType = TokenType::Access;
    const TTL_SECS: i64 = 15 * 60;
}

impl TokenKind for Refresh {
    const TYPE: TokenType = TokenType::Refresh;
    const TTL_SECS: i64 = 7 * 24 * 60 * 60;
}

/// HMAC secret for one token kind. A `TokenSecret<Access>` cannot be used
/// where a `TokenSecret<Refresh>` is expected.
#[derive(Clone)]
pub struct TokenSecret<K: TokenKind> {
    secret: String,
    _kind: PhantomData<K>,
}

impl<K: TokenKind> fmt::Debug for TokenSecret<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("kind", &K::TYPE)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl<K: TokenKind> TokenSecret<K> {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            _kind: PhantomData,
        }
    }

    /// Claims for a fresh token of this kind, expiring `K::TTL_SECS` from now.
    pub fn claims_for(user_id: &str, role: Role) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: user_id.to_string(),
            role,
            typ: K::TYPE,
            iat: now,
            exp: now + K::TTL_SECS,
        }
    }

    pub fn issue(&self, user_id: &str, role: Role) -> Result<String> {
        self.sign(&Self::claims_for(user_id, role))
    }

    /// Sign arbitrary claims. The claims must carry this kind's token type.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        if self.secret.is_empty() {
            bail!("{:?} token secret is not configured", K::TYPE);
        }
        if claims.typ != K::TYPE {
            bail!(
                "Cannot sign {:?} claims with a {:?} secret",
                claims.typ,
                K::TYPE
            );
        }
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .with_context(|| format!("Failed to create {:?} token", K::TYPE))
    }

    /// Verify signature, expiry (no leeway) and token type.
    pub fn validate(&self, token: &str) -> Result<Claims, InvalidCredential> {
        if self.secret.is_empty() {
            return Err(InvalidCredential);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let token_data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| InvalidCredential)?;
        if token_data.claims.typ != K::TYPE {
            return Err(InvalidCredential);
        }
        Ok(token_data.claims)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Issues and validates access/refresh token pairs.
#[derive(Debug, Clone)]
pub struct TokenService {
    access: TokenSecret<Access>,
    refresh: TokenSecret<Refresh>,
}

impl TokenService {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access: TokenSecret::new(access_secret),
            refresh: TokenSecret::new(refresh_secret),
        }
    }

    pub fn access(&self) -> &TokenSecret<Access> {
        &self.access
    }

    pub fn refresh(&self) -> &TokenSecret<Refresh> {
        &self.refresh
    }

    pub fn issue_pair(&self, user_id: &str, role: Role) -> Result<TokenPair> {
        Ok(TokenPair {
            token: self.access.issue(user_id, role)?,
            refresh_token: self.refresh.issue(user_id, role)?,
        })
    }

    pub fn validate_access(&self, token: &str) -> Result<Claims, InvalidCredential> {
        self.access.validate(token)
    }

    pub fn validate_refresh(&self, token: &str) -> Result<Claims, InvalidCredential> {
        self.refresh.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &str = "test-access-secret";
    const REFRESH_SECRET: &str = "test-refresh-secret";

    fn service() -> TokenService {
        TokenService::new(ACCESS_SECRET, REFRESH_SECRET)
    }

    #[test]
    fn test_password_hash_and_verify_correct() {
        let password = "my-secure-password";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_password_verify_wrong() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_password_hash_is_not_plaintext() {
        let hash = hash_password("plain-secret").unwrap();
        assert!(!hash.contains("plain-secret"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_access_token_roundtrip_returns_issued_claims() {
        let secret = TokenSecret::<Access>::new(ACCESS_SECRET);
        let claims = TokenSecret::<Access>::claims_for("user-123", Role::Admin);
        let token = secret.sign(&claims).unwrap();
        assert_eq!(secret.validate(&token).unwrap(), claims);
    }

    #[test]
    fn test_issue_pair_tokens_are_distinct() {
        let pair = service().issue_pair("user-1", Role::User).unwrap();
        assert_ne!(pair.token, pair.refresh_token);

        let access = service().validate_access(&pair.token).unwrap();
        assert_eq!(access.sub, "user-1");
        assert_eq!(access.role, Role::User);
        assert_eq!(access.typ, TokenType::Access);
        assert_eq!(access.exp - access.iat, Access::TTL_SECS);

        let refresh = service().validate_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.typ, TokenType::Refresh);
        assert_eq!(refresh.exp - refresh.iat, Refresh::TTL_SECS);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let pair = service().issue_pair("user-1", Role::User).unwrap();
        assert_eq!(
            service().validate_access(&pair.refresh_token),
            Err(InvalidCredential)
        );
        assert_eq!(
            service().validate_refresh(&pair.token),
            Err(InvalidCredential)
        );
    }

    #[test]
    fn test_kind_checked_even_with_shared_secret() {
        let access = TokenSecret::<Access>::new("shared");
        let refresh = TokenSecret::<Refresh>::new("shared");
        let token = refresh.issue("user-1", Role::User).unwrap();
        assert_eq!(access.validate(&token), Err(InvalidCredential));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = TokenSecret::<Access>::new("secret-1")
            .issue("user-1", Role::User)
            .unwrap();
        let result = TokenSecret::<Access>::new("secret-2").validate(&token);
        assert_eq!(result, Err(InvalidCredential));
    }

    #[test]
    fn test_expired_token_fails() {
        let secret = TokenSecret::<Access>::new(ACCESS_SECRET);
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            role: Role::User,
            typ: TokenType::Access,
            iat: now - 120,
            exp: now - 5,
        };
        let token = secret.sign(&claims).unwrap();
        assert_eq!(secret.validate(&token), Err(InvalidCredential));
    }

    #[test]
    fn test_garbage_token_fails() {
        let secret = TokenSecret::<Access>::new(ACCESS_SECRET);
        assert_eq!(secret.validate("not.a.jwt"), Err(InvalidCredential));
        assert_eq!(secret.validate(""), Err(InvalidCredential));
    }

    #[test]
    fn test_empty_secret_cannot_sign() {
        let err = TokenService::new("", REFRESH_SECRET)
            .issue_pair("user-1", Role::User)
            .unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_sign_rejects_mismatched_claims_type() {
        let claims = TokenSecret::<Refresh>::claims_for("user-1", Role::User);
        assert!(TokenSecret::<Access>::new(ACCESS_SECRET)
            .sign(&claims)
            .is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains(ACCESS_SECRET));
        assert!(!rendered.contains(REFRESH_SECRET));
    }
}
