//! HS256 access tokens for the admin panel.
//!
//! There is a single admin identity; the token carries its role and an
//! expiry. Nothing is stored server-side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use memorial_core::error::CoreError;
use memorial_core::roles::ROLE_ADMIN;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{parse_var, required_var, ConfigError};

/// Subject used for the shared admin identity.
pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier, for audit.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

const DEFAULT_EXPIRY_HOURS: i64 = 12;

impl JwtConfig {
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  |         |
    /// | `JWT_EXPIRY_HOURS` | no       | `12`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required_var("JWT_SECRET")?,
            expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?,
        })
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

pub fn generate_access_token(
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        role: role.to_string(),
        exp: now + config.expires_in(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Check that `token` is present, valid and carries the admin role.
///
/// Used for the moderation call, which receives the token in its body
/// instead of the `Authorization` header.
pub fn require_admin_token(token: Option<&str>, config: &JwtConfig) -> Result<Claims, CoreError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoreError::Unauthorized("Admin token is required".into()))?;

    let claims = validate_token(token, config)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

    if claims.role != ROLE_ADMIN {
        return Err(CoreError::Unauthorized("Admin role required".into()));
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 12,
        }
    }

    #[test]
    fn generate_and_validate() {
        let config = test_config();
        let token = generate_access_token(ROLE_ADMIN, &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, ADMIN_SUBJECT);
        assert_eq!(claims.role, ROLE_ADMIN);
        assert_eq!(claims.exp - claims.iat, 12 * 3600);
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: ADMIN_SUBJECT.into(),
            role: ROLE_ADMIN.into(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn different_secret_fails() {
        let token = generate_access_token(ROLE_ADMIN, &test_config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".into(),
            expiry_hours: 12,
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn missing_body_token_is_unauthorized() {
        let err = require_admin_token(None, &test_config()).unwrap_err();
        assert_matches!(err, CoreError::Unauthorized(_));
        let err = require_admin_token(Some("  "), &test_config()).unwrap_err();
        assert_matches!(err, CoreError::Unauthorized(_));
    }

    #[test]
    fn non_admin_role_is_unauthorized() {
        let config = test_config();
        let token = generate_access_token("viewer", &config).unwrap();
        let err = require_admin_token(Some(&token), &config).unwrap_err();
        assert_matches!(err, CoreError::Unauthorized(msg) if msg.contains("Admin role"));
    }
}
