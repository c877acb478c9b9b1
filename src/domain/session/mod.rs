//! Session aggregate

mod model;
mod repository;

pub use model::{CreateSessionDto, Session};
pub use repository::SessionRepositoryInterface;
