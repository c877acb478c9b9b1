//! Domain layer: aggregates, DTOs and repository contracts.
//!
//! Nothing in here knows about HTTP or the ORM.

pub mod academic;
pub mod account;
pub mod repositories;
pub mod role_permission;
pub mod session;
pub mod user;

pub use academic::*;
pub use account::*;
pub use repositories::{DomainResult, RepositoryProvider};
pub use role_permission::*;
pub use session::*;
pub use user::*;

pub use crate::shared::errors::DomainError;
