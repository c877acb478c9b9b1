//! # MSL School server
//!
//! Authentication, sessions and academic records for the MSL school
//! administration system, served as RPC procedures over HTTP.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: credential/session service and the seed
//! - **infrastructure**: SeaORM persistence and crypto
//! - **interfaces**: the `/rpc` router, request context and procedures
//! - **server**: lifecycle (database, migrations, listener, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export the HTTP application
pub use interfaces::http::{create_app, AppState};
