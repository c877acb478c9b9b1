//! User aggregate
//!
//! Contains the User entity, its creation DTO and the repository interface.

mod model;
mod repository;

mod dto_create;

pub use model::{User, UserRole};

pub use dto_create::CreateUserDto;

pub use repository::UserRepositoryInterface;
