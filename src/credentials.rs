use tracing::debug;

use crate::error::{Result, SeedError};

/// Work factor used when the configuration does not override it.
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;
/// bcrypt ignores every byte past this; longer passwords are refused.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Salted bcrypt hashing. The salt is drawn per call and embedded in the
/// digest, so hashing the same plaintext twice gives two different strings.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: HASH_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plaintext: &str) -> Result<String> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(SeedError::PasswordTooLong {
                len: plaintext.len(),
                max: MAX_PASSWORD_BYTES,
            });
        }
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(err) => {
                debug!(error = %err, "stored digest is not a bcrypt hash");
                false
            }
        }
    }
}
