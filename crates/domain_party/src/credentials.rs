//! Credential hashing
//!
//! The hasher is a collaborator of the user service: it turns plaintext
//! passwords into digests and verifies plaintext against stored digests.
//! Argon2id with PHC string output is the production implementation.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::UserError;

/// Hashes and verifies credentials
pub trait CredentialHasher: Send + Sync {
    /// Produces a digest for the plaintext password
    fn hash(&self, plaintext: &str) -> Result<String, UserError>;

    /// Checks a plaintext password against a stored digest
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Argon2id hasher producing PHC strings with a random salt
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, UserError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::Credential(e.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        // A digest that does not parse (e.g. a legacy plaintext row) never verifies
        match PasswordHash::new(digest) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
