//! Signed session tokens
//!
//! The token handed to clients is an HS256 JWT naming the server-side
//! session (`sid`). A valid signature alone does not authenticate: the
//! session row must still exist and be unexpired.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token signing configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim (the auth base URL)
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Session ID
    pub sid: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// Sign a token for the given session; `expires_at` should match the
/// session row's expiry.
pub fn create_token(
    user_id: &str,
    session_id: &str,
    expires_at: DateTime<Utc>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        sid: session_id.to_string(),
        exp: expires_at.timestamp(),
        iat: Utc::now().timestamp(),
        iss: config.issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer and expiry, and decode the claims.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Like [`verify_token`] but accepts tokens past their `exp`. Used to
/// identify stale sessions so their rows can be removed.
pub fn verify_token_ignoring_expiry(
    token: &str,
    config: &JwtConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.validate_exp = false;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            issuer: "http://localhost:3000".into(),
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let expires = Utc::now() + Duration::hours(1);
        let token = create_token("user-123", "sid-abc", expires, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.sid, "sid-abc");
        assert_eq!(claims.exp, expires.timestamp());
        assert_eq!(claims.iss, "http://localhost:3000");
    }

    #[test]
    fn test_invalid_token() {
        assert!(verify_token("invalid-token", &config()).is_err());
    }

    #[test]
    fn rejects_foreign_secret_and_issuer() {
        let expires = Utc::now() + Duration::hours(1);
        let token = create_token("u", "s", expires, &config()).unwrap();

        let other_secret = JwtConfig {
            secret: "other".into(),
            ..config()
        };
        assert!(verify_token(&token, &other_secret).is_err());

        let other_issuer = JwtConfig {
            issuer: "https://elsewhere.example".into(),
            ..config()
        };
        assert!(verify_token(&token, &other_issuer).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let expired = Utc::now() - Duration::minutes(5);
        let token = create_token("u", "s", expired, &config()).unwrap();
        assert!(verify_token(&token, &config()).is_err());

        let stale = verify_token_ignoring_expiry(&token, &config()).unwrap();
        assert_eq!(stale.sid, "s");
    }

    #[test]
    fn expiry_bypass_still_checks_signature() {
        let expired = Utc::now() - Duration::minutes(5);
        let token = create_token("u", "s", expired, &config()).unwrap();
        let other_secret = JwtConfig {
            secret: "other".into(),
            ..config()
        };
        assert!(verify_token_ignoring_expiry(&token, &other_secret).is_err());
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-secret"));
    }
}
