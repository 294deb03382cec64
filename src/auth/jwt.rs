use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::core::app_error::AppError;
use crate::core::config::AuthConfig;

/// Claims carried by an issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject).
    pub sub: i32,
    pub email: String,
    /// Expiry timestamp (seconds).
    pub exp: i64,
    /// Issued-at timestamp (seconds).
    pub iat: i64,
}

/// Issues and verifies the signed tokens that stand in for a hosted
/// identity provider's session handles.
#[derive(Clone)]
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl_minutes: i64,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.token_secret.as_bytes()),
            token_ttl_minutes: config.token_ttl_minutes,
        }
    }

    pub fn issue_token(&self, user_id: i32, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: (now + Duration::minutes(self.token_ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".into()),
                _ => AppError::Unauthorized("Invalid token".into()),
            })
    }

    /// Strip the scheme from an `Authorization: Bearer <token>` header.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(ttl_minutes: i64) -> AuthService {
        AuthService::new(&AuthConfig {
            token_secret: "test-secret-at-least-32-bytes-long!".to_string(),
            token_ttl_minutes: ttl_minutes,
        })
    }

    #[test]
    fn issued_tokens_round_trip() {
        let auth = service(60);
        let token = auth.issue_token(7, "user@example.com").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // Issue a token that expired well past the default validation leeway.
        let auth = service(-10);
        let token = auth.issue_token(7, "user@example.com").unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let token = service(60).issue_token(7, "user@example.com").unwrap();
        let other = AuthService::new(&AuthConfig {
            token_secret: "another-secret-also-32-bytes-long!!".to_string(),
            token_ttl_minutes: 60,
        });
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn bearer_scheme_is_stripped() {
        assert_eq!(AuthService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(AuthService::extract_from_header("Basic abc"), None);
    }
}
