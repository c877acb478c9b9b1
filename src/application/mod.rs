//! Application layer: use-cases over the domain repositories.

pub mod identity;
pub mod seed;

pub use identity::{CredentialConfig, CredentialService, Identity, SignInOutcome, SignUpInput};
pub use seed::{run_seed, SeedSummary};
