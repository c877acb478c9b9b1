//! Identity module: credentials and sessions
//!
//! `CredentialService` runs sign-up, sign-in, session lookup and sign-out;
//! `transport` knows where tokens live in request headers.

pub mod service;
pub mod transport;

pub use service::{
    CredentialConfig, CredentialService, Identity, SignInOutcome, SignUpInput, MAX_PASSWORD_LEN,
    MIN_PASSWORD_LEN,
};
