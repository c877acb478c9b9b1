//! Authentication procedures: sign-in, sign-up, session lookup and sign-out

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
