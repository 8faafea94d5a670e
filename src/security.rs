//! Password hashing helpers (bcrypt, salted per hash)

use bcrypt::{hash, verify};

use crate::error::Result;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(hash(password, cost)?)
}

/// Check a password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    Ok(verify(password, password_hash)?)
}
