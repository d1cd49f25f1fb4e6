//! Argon2id password hashing and operator credential checks.
//!
//! The operator's password is configured as a PHC string
//! (`$argon2id$v=19$...`), so algorithm parameters and salt travel with it.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::AuthConfig;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Used by `pvptracker-api hash-password` to produce `USER_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check submitted credentials against the configured operator.
///
/// The password hash is verified even when the username is wrong so both
/// failure paths cost the same.
pub fn verify_operator(
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let password_ok = verify_password(password, &config.password_hash)?;
    Ok(password_ok && username == config.username)
}
