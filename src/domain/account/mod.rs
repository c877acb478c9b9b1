//! Account (profile) aggregate

mod model;
mod repository;

pub use model::{Account, UpsertAccountDto};
pub use repository::AccountRepositoryInterface;
