//! Cryptographic helpers: password hashing, session ids, signed tokens.

pub mod jwt;
pub mod password;
pub mod session_id;
