pub mod academic;
pub mod auth;
pub mod request_id;
pub mod system;
