//! JWT token handling for editor sessions

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub const ISSUER: &'static str = "moneyfeast-blog";

    pub fn from_security(security: &SecurityConfig) -> Self {
        Self {
            secret: security.jwt_secret.clone(),
            expiration_hours: security.jwt_expiration_hours,
            issuer: Self::ISSUER.to_string(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_security(&SecurityConfig::default())
    }
}

/// Claims carried by an editor session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(
        user_id: &str,
        email: &str,
        display_name: &str,
        role: &str,
        config: &JwtConfig,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Sign a token for the given claims
pub fn create_token(
    claims: &TokenClaims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(config: &JwtConfig) -> TokenClaims {
        TokenClaims::new("user-123", "jane@moneyfeast.local", "Jane", "admin", config)
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = JwtConfig::default();
        let token = create_token(&claims(&config), &config).unwrap();

        let decoded = verify_token(&token, &config).unwrap();
        assert_eq!(decoded.sub, "user-123");
        assert_eq!(decoded.email, "jane@moneyfeast.local");
        assert_eq!(decoded.display_name, "Jane");
        assert!(!decoded.is_expired());
        assert_eq!(decoded.role, "admin");
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::default();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let config = JwtConfig::default();
        let token = create_token(&claims(&config), &config).unwrap();

        let other = JwtConfig {
            secret: "a-completely-different-secret".into(),
            ..JwtConfig::default()
        };
        assert!(verify_token(&token, &other).is_err());
    }
}
