//! HTTP RPC interface
//!
//! - `context`: per-request session context
//! - `procedure`: the public/protected gate
//! - `modules`: procedure handlers grouped by area
//! - `router`: route table, CORS, tracing and Swagger UI

pub mod common;
pub mod context;
pub mod dto;
pub mod modules;
pub mod procedure;
pub mod router;
pub mod state;

pub use context::RequestContext;
pub use procedure::Authenticated;
pub use router::{create_app, ApiDoc};
pub use state::AppState;
