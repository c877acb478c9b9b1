//! Application configuration
//!
//! Loaded from a TOML file (missing file means defaults), then overridden
//! from the environment, then from the command line.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! url = "sqlite://./msl-school.db?mode=rwc"
//!
//! [auth]
//! base_url = "http://localhost:3000"
//! secret = "change-me"
//!
//! [cors]
//! origin = "http://localhost:3001"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::application::CredentialConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;

/// Signing secret used when none is configured. Fine for local runs only.
pub const DEV_AUTH_SECRET: &str = "msl-school-development-secret-do-not-use-in-production";

/// Session lifetime bounds, in hours. Ten years keeps expiry timestamps far
/// from `DateTime` overflow.
pub const MIN_SESSION_HOURS: i64 = 1;
pub const MAX_SESSION_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Public base URL of this server; used as the token issuer
    pub base_url: String,
    pub secret: String,
    pub session_expiration_hours: i64,
    pub cookie_name: String,
    pub secure_cookies: bool,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            secret: DEV_AUTH_SECRET.to_string(),
            session_expiration_hours: 24 * 7,
            cookie_name: "msl.session_token".to_string(),
            secure_cookies: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("base_url", &self.base_url)
            .field("secret", &"<redacted>")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .field("cookie_name", &self.cookie_name)
            .field("secure_cookies", &self.secure_cookies)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The single browser origin allowed to call the API with credentials
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `CORS_ORIGIN`, `AUTH_URL`, `AUTH_SECRET`, `DATABASE_URL`,
    /// `HOST`, `PORT` and `LOG_LEVEL` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with a
    /// caller-supplied lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(origin) = get("CORS_ORIGIN") {
            self.cors.origin = origin;
        }
        if let Some(url) = get("AUTH_URL") {
            self.auth.base_url = url;
        }
        if let Some(secret) = get("AUTH_SECRET") {
            self.auth.secret = secret;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid PORT"),
            }
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.auth.secret == DEV_AUTH_SECRET
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// `auth.session_expiration_hours` clamped to
    /// [`MIN_SESSION_HOURS`]..=[`MAX_SESSION_HOURS`].
    pub fn session_ttl(&self) -> chrono::Duration {
        let configured = self.auth.session_expiration_hours;
        let hours = configured.clamp(MIN_SESSION_HOURS, MAX_SESSION_HOURS);
        if hours != configured {
            warn!(
                configured,
                used = hours,
                "auth.session_expiration_hours out of range; clamped"
            );
        }
        chrono::Duration::hours(hours)
    }

    pub fn credential_config(&self) -> CredentialConfig {
        CredentialConfig {
            jwt: JwtConfig {
                secret: self.auth.secret.clone(),
                issuer: self.auth.base_url.clone(),
            },
            session_ttl: self.session_ttl(),
            cookie_name: self.auth.cookie_name.clone(),
            secure_cookies: self.auth.secure_cookies,
            bcrypt_cost: self.auth.bcrypt_cost,
        }
    }
}

/// `<config dir>/msl-school/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("msl-school").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.cors.origin, "http://localhost:3001");
        assert_eq!(cfg.auth.cookie_name, "msl.session_token");
        assert!(cfg.uses_dev_secret());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [auth]
            secret = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.auth.secret, "s3cret");
        assert_eq!(cfg.auth.base_url, "http://localhost:3000");
        assert!(!cfg.uses_dev_secret());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = AppConfig::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("msl-school-does-not-exist-1f3a/config.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CORS_ORIGIN", "https://school.example"),
            ("AUTH_URL", "https://api.school.example"),
            ("AUTH_SECRET", "from-env"),
            ("DATABASE_URL", "postgres://u:p@db/msl"),
            ("PORT", "not-a-port"),
            ("LOG_LEVEL", ""),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.cors.origin, "https://school.example");
        assert_eq!(cfg.auth.base_url, "https://api.school.example");
        assert_eq!(cfg.auth.secret, "from-env");
        assert_eq!(cfg.database.url, "postgres://u:p@db/msl");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn credential_config_uses_base_url_as_issuer() {
        let mut cfg = AppConfig::default();
        cfg.auth.session_expiration_hours = 2;
        let creds = cfg.credential_config();
        assert_eq!(creds.jwt.issuer, "http://localhost:3000");
        assert_eq!(creds.session_ttl, chrono::Duration::hours(2));
    }

    #[test]
    fn session_ttl_is_clamped() {
        let mut cfg = AppConfig::default();

        cfg.auth.session_expiration_hours = i64::MAX;
        assert_eq!(cfg.session_ttl(), chrono::Duration::hours(MAX_SESSION_HOURS));
        assert!(chrono::Utc::now()
            .checked_add_signed(cfg.credential_config().session_ttl)
            .is_some());

        cfg.auth.session_expiration_hours = -5;
        assert_eq!(cfg.session_ttl(), chrono::Duration::hours(MIN_SESSION_HOURS));
    }

    #[test]
    fn session_ttl_from_toml_does_not_panic() {
        let cfg = AppConfig::from_toml(
            r#"
            [auth]
            session_expiration_hours = 9223372036854775807
            "#,
        )
        .unwrap();
        assert_eq!(cfg.session_ttl(), chrono::Duration::hours(MAX_SESSION_HOURS));
    }

    #[test]
    fn debug_redacts_secret() {
        let cfg = AppConfig::default();
        let printed = format!("{:?}", cfg.auth);
        assert!(!printed.contains(DEV_AUTH_SECRET));
    }
}
