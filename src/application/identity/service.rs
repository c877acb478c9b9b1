//! Credential & session service
//!
//! Owns password verification, session issuance, session lookup from
//! request headers and sign-out. HTTP handlers are thin wrappers over it.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use tracing::{debug, info, warn};

use super::transport::{client_ip, extract_token, headers_with_token, user_agent};
use crate::domain::{
    CreateSessionDto, CreateUserDto, DomainError, DomainResult, RepositoryProvider, Session, User,
    UserRole,
};
use crate::infrastructure::crypto::jwt::{
    create_token, verify_token, verify_token_ignoring_expiry, JwtConfig,
};
use crate::infrastructure::crypto::password::{
    fits_bcrypt, hash_password_with_cost, verify_password, MAX_PASSWORD_BYTES,
};
use crate::infrastructure::crypto::session_id::generate_session_id;
use crate::shared::errors::InfraError;

/// Settings for issuing and reading sessions.
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    pub jwt: JwtConfig,
    pub session_ttl: Duration,
    pub cookie_name: String,
    /// Adds `Secure` to the session cookie.
    pub secure_cookies: bool,
    pub bcrypt_cost: u32,
}

/// Input for account creation. Shape validation happens at the edge; the
/// service re-checks the rules it depends on.
#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub username: Option<String>,
}

/// Result of a successful credential check.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    pub user: User,
    pub session: Session,
    pub token: String,
}

/// Which identity field the caller signed in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<'a> {
    Email(&'a str),
    Username(&'a str),
}

pub struct CredentialService {
    repos: Arc<dyn RepositoryProvider>,
    config: CredentialConfig,
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

impl CredentialService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: CredentialConfig) -> Self {
        Self { repos, config }
    }

    pub fn config(&self) -> &CredentialConfig {
        &self.config
    }

    pub fn repos(&self) -> &dyn RepositoryProvider {
        self.repos.as_ref()
    }

    // ── Registration ────────────────────────────────────────────

    /// Creates a user with a hashed credential. No session is issued.
    pub async fn sign_up(&self, input: SignUpInput) -> DomainResult<User> {
        let password_len = input.password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password_len) {
            return Err(DomainError::Validation(format!(
                "Password must be {}-{} characters",
                MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
            )));
        }
        if !fits_bcrypt(&input.password) {
            return Err(DomainError::Validation(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        if !input.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name is required".into()));
        }

        let password_hash = hash_password_with_cost(&input.password, self.config.bcrypt_cost)
            .map_err(|e| InfraError::Crypto(format!("password hashing failed: {}", e)))?;

        let dto = CreateUserDto {
            name: name.to_string(),
            email: input.email.trim().to_lowercase(),
            username: input.username.map(|u| u.trim().to_lowercase()),
            password_hash,
            role: UserRole::default(),
        };

        let user = self.repos.users().create_user(dto).await?;
        info!(user_id = %user.id, email = %user.email, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Verifies the credential and opens a session. Every failure is
    /// `Unauthorized`; no session row exists unless this returns `Ok`.
    pub async fn sign_in(
        &self,
        identity: Identity<'_>,
        password: &str,
        headers: &HeaderMap,
    ) -> DomainResult<SignInOutcome> {
        let user = match identity {
            Identity::Email(email) => {
                self.repos
                    .users()
                    .get_user_by_email(&email.trim().to_lowercase())
                    .await?
            }
            Identity::Username(username) => {
                self.repos
                    .users()
                    .get_user_by_username(&username.trim().to_lowercase())
                    .await?
            }
        };

        let Some(user) = user else {
            debug!(?identity, "Sign-in for unknown identity");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = match verify_password(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                false
            }
        };
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let expires_at = Utc::now() + self.config.session_ttl;
        let session = self
            .repos
            .sessions()
            .create_session(CreateSessionDto {
                id: generate_session_id(),
                user_id: user.id.clone(),
                expires_at,
                ip_address: client_ip(headers),
                user_agent: user_agent(headers),
            })
            .await?;

        let token = create_token(&user.id, &session.id, session.expires_at, &self.config.jwt)
            .map_err(|e| InfraError::Crypto(format!("token signing failed: {}", e)))?;

        info!(user_id = %user.id, "Session opened");
        Ok(SignInOutcome {
            user,
            session,
            token,
        })
    }

    /// Reads a freshly opened session back through the header lookup.
    /// When that does not yield the session, the row is deleted so a failed
    /// sign-in leaves nothing behind.
    pub async fn confirm_session(
        &self,
        outcome: &SignInOutcome,
    ) -> DomainResult<Option<(Session, User)>> {
        let found = self.get_session(&headers_with_token(&outcome.token)).await;
        match found {
            Ok(Some((session, user))) if session.id == outcome.session.id => {
                Ok(Some((session, user)))
            }
            other => {
                warn!(session_id = %outcome.session.id, "Discarding unconfirmed session");
                self.repos
                    .sessions()
                    .delete_session(&outcome.session.id)
                    .await?;
                other.map(|_| None)
            }
        }
    }

    // ── Session lookup ──────────────────────────────────────────

    /// Resolves the caller's session. A missing, forged or expired token is
    /// `Ok(None)`; only storage failures are errors.
    pub async fn get_session(&self, headers: &HeaderMap) -> DomainResult<Option<(Session, User)>> {
        let Some(token) = extract_token(headers, &self.config.cookie_name) else {
            return Ok(None);
        };

        let claims = match verify_token(&token, &self.config.jwt) {
            Ok(claims) => claims,
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                if let Ok(stale) = verify_token_ignoring_expiry(&token, &self.config.jwt) {
                    debug!(session_id = %stale.sid, "Dropping expired session");
                    self.repos.sessions().delete_session(&stale.sid).await?;
                }
                return Ok(None);
            }
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                return Ok(None);
            }
        };

        let Some(session) = self.repos.sessions().find_session(&claims.sid).await? else {
            return Ok(None);
        };

        if session.user_id != claims.sub {
            warn!(session_id = %session.id, "Token subject does not own the session");
            return Ok(None);
        }

        if session.is_expired_at(Utc::now()) {
            debug!(session_id = %session.id, "Dropping expired session");
            self.repos.sessions().delete_session(&session.id).await?;
            return Ok(None);
        }

        let user = self.repos.users().get_user_by_id(&session.user_id).await?;
        Ok(user.map(|user| (session, user)))
    }

    // ── Sign-out ────────────────────────────────────────────────

    /// Removes the caller's session. Returns whether one was removed;
    /// signing out without a session is not an error.
    pub async fn sign_out(&self, headers: &HeaderMap) -> DomainResult<bool> {
        let Some(token) = extract_token(headers, &self.config.cookie_name) else {
            return Ok(false);
        };

        // An expired token still names a session worth removing.
        let Ok(claims) = verify_token_ignoring_expiry(&token, &self.config.jwt) else {
            return Ok(false);
        };

        let removed = self.repos.sessions().delete_session(&claims.sid).await?;
        if removed {
            info!(user_id = %claims.sub, "Session closed");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn service_with_ttl(ttl: Duration) -> CredentialService {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&db).await.unwrap();
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));

        CredentialService::new(
            repos,
            CredentialConfig {
                jwt: JwtConfig {
                    secret: "unit-test-secret".into(),
                    issuer: "http://localhost:3000".into(),
                },
                session_ttl: ttl,
                cookie_name: "msl.session_token".into(),
                secure_cookies: false,
                bcrypt_cost: 4,
            },
        )
    }

    async fn service() -> CredentialService {
        service_with_ttl(Duration::hours(1)).await
    }

    fn sign_up_input(username: Option<&str>) -> SignUpInput {
        SignUpInput {
            name: "Somchai".into(),
            email: "Somchai@MSL.ac.th".into(),
            password: "s3cure-pass".into(),
            username: username.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn sign_up_normalises_identity_fields() {
        let svc = service().await;
        let user = svc.sign_up(sign_up_input(Some("Somchai.J"))).await.unwrap();

        assert_eq!(user.email, "somchai@msl.ac.th");
        assert_eq!(user.username.as_deref(), Some("somchai.j"));
        assert_eq!(user.role, UserRole::User);
        assert_ne!(user.password_hash, "s3cure-pass");
    }

    #[tokio::test]
    async fn sign_up_rejects_short_password_and_duplicates() {
        let svc = service().await;

        let mut short = sign_up_input(None);
        short.password = "short".into();
        assert!(matches!(
            svc.sign_up(short).await,
            Err(DomainError::Validation(_))
        ));

        svc.sign_up(sign_up_input(Some("somchai"))).await.unwrap();
        assert!(matches!(
            svc.sign_up(sign_up_input(Some("other"))).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn sign_in_then_lookup_then_sign_out() {
        let svc = service().await;
        svc.sign_up(sign_up_input(Some("somchai"))).await.unwrap();

        let outcome = svc
            .sign_in(Identity::Username("SOMCHAI"), "s3cure-pass", &HeaderMap::new())
            .await
            .unwrap();

        let headers = headers_with_token(&outcome.token);
        let (session, user) = svc.get_session(&headers).await.unwrap().unwrap();
        assert_eq!(session.id, outcome.session.id);
        assert_eq!(user.id, outcome.user.id);

        assert!(svc.sign_out(&headers).await.unwrap());
        assert!(svc.get_session(&headers).await.unwrap().is_none());
        assert!(!svc.sign_out(&headers).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_opens_no_session() {
        let svc = service().await;
        svc.sign_up(sign_up_input(None)).await.unwrap();

        let result = svc
            .sign_in(Identity::Email("somchai@msl.ac.th"), "wrong-pass", &HeaderMap::new())
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));

        let unknown = svc
            .sign_in(Identity::Email("nobody@msl.ac.th"), "s3cure-pass", &HeaderMap::new())
            .await;
        assert!(matches!(unknown, Err(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn expired_session_is_removed_on_lookup() {
        let svc = service_with_ttl(Duration::seconds(-1)).await;
        svc.sign_up(sign_up_input(Some("somchai"))).await.unwrap();

        let outcome = svc
            .sign_in(Identity::Username("somchai"), "s3cure-pass", &HeaderMap::new())
            .await
            .unwrap();

        assert!(svc
            .get_session(&headers_with_token(&outcome.token))
            .await
            .unwrap()
            .is_none());
        assert!(svc
            .repos()
            .sessions()
            .find_session(&outcome.session.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn sign_up_rejects_blank_name() {
        let svc = service().await;
        let mut blank = sign_up_input(None);
        blank.name = "   ".into();

        assert!(matches!(
            svc.sign_up(blank).await,
            Err(DomainError::Validation(_))
        ));
        assert!(svc
            .repos()
            .users()
            .get_user_by_email("somchai@msl.ac.th")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn sign_up_rejects_password_past_bcrypt_limit() {
        let svc = service().await;
        let mut long = sign_up_input(None);
        // 30 Thai characters: within 128 characters, over 72 bytes.
        long.password = "ก".repeat(30);

        assert!(matches!(
            svc.sign_up(long).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unconfirmed_session_is_discarded() {
        let svc = service().await;
        svc.sign_up(sign_up_input(Some("somchai"))).await.unwrap();

        let mut outcome = svc
            .sign_in(Identity::Username("somchai"), "s3cure-pass", &HeaderMap::new())
            .await
            .unwrap();
        let session_id = outcome.session.id.clone();
        outcome.token = "not-a-jwt".into();

        assert!(svc.confirm_session(&outcome).await.unwrap().is_none());
        assert!(svc
            .repos()
            .sessions()
            .find_session(&session_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn confirmed_session_is_kept() {
        let svc = service().await;
        svc.sign_up(sign_up_input(Some("somchai"))).await.unwrap();

        let outcome = svc
            .sign_in(Identity::Username("somchai"), "s3cure-pass", &HeaderMap::new())
            .await
            .unwrap();

        let (session, _) = svc.confirm_session(&outcome).await.unwrap().unwrap();
        assert_eq!(session.id, outcome.session.id);
    }

    #[tokio::test]
    async fn garbage_token_is_no_session() {
        let svc = service().await;
        let headers = headers_with_token("not-a-jwt");
        assert!(svc.get_session(&headers).await.unwrap().is_none());
        assert!(!svc.sign_out(&headers).await.unwrap());
    }
}
