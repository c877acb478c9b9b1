//! Password hashing utilities
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are
//! refused at sign-up and never verify, so two passwords sharing a 72-byte
//! prefix cannot stand in for each other.

use bcrypt::{hash, verify};

/// Largest password, in UTF-8 bytes, bcrypt fully covers.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Whether every byte of `password` is covered by the bcrypt hash.
pub fn fits_bcrypt(password: &str) -> bool {
    password.len() <= MAX_PASSWORD_BYTES
}

/// Hash with an explicit work factor (4..=31). Callers check
/// [`fits_bcrypt`] first.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a bcrypt hash (`$2a$`, `$2b$`, `$2y$`).
/// Passwords past [`MAX_PASSWORD_BYTES`] never match.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    if !fits_bcrypt(password) {
        return Ok(false);
    }
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct horse battery";
        let hashed = hash_password_with_cost(password, 4).unwrap();

        assert!(hashed.starts_with("$2b$04$"));
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong password", &hashed).unwrap());
    }

    #[test]
    fn verifies_legacy_2a_hashes() {
        let legacy = "$2a$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi";
        assert!(verify_password("password", legacy).unwrap());
        assert!(!verify_password("Password", legacy).unwrap());
    }

    #[test]
    fn suffix_past_72_bytes_does_not_verify() {
        let stored = "a".repeat(MAX_PASSWORD_BYTES);
        let hashed = hash_password_with_cost(&stored, 4).unwrap();

        assert!(verify_password(&stored, &hashed).unwrap());
        assert!(!verify_password(&format!("{stored}-anything"), &hashed).unwrap());
    }

    #[test]
    fn byte_limit_counts_utf8_bytes() {
        // 24 Thai characters are 72 bytes; one more is over.
        assert!(fits_bcrypt(&"ก".repeat(24)));
        assert!(!fits_bcrypt(&"ก".repeat(25)));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("password", "not-a-bcrypt-hash").is_err());
    }
}
