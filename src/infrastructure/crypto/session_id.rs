//! Opaque session identifiers

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generates a fresh session id: 32 random bytes, SHA-256, hex encoded.
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}
