use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt hashing with a fixed work factor.
///
/// Both operations are CPU-bound; handlers run them through `web::block`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Produces a salted digest. A fresh salt is drawn on every call.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
    }

    /// Returns `false` for a mismatch and for a digest bcrypt cannot parse.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password digest could not be verified: {}", e);
                false
            }
        }
    }

    /// Stand-in for [`verify`](Self::verify) when there is no stored digest. Does the same
    /// bcrypt work so an unknown account answers no faster than a wrong password.
    pub fn verify_missing(&self, password: &str) -> bool {
        if let Err(e) = hash(password, self.cost) {
            log::warn!("Decoy password hash failed: {}", e);
        }
        false
    }
}
