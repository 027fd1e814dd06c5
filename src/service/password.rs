use crate::error::MindwellError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Derive a salted one-way hash of `password` in PHC string format.
/// Each call draws a fresh salt, so repeated calls with the same input
/// produce distinct strings that all verify.
pub fn hash(password: &str) -> Result<String, MindwellError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| MindwellError::Hash(e.to_string()))
}

/// Check `password` against a stored PHC hash string.
pub fn verify(password: &str, stored: &str) -> Result<bool, MindwellError> {
    let parsed = PasswordHash::new(stored).map_err(|e| MindwellError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
