use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::server::error::Error;

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Returns `Ok(false)` on a mismatch, errors only when the stored hash cannot be read.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    /// Expect the original password to verify and another to be rejected
    #[test]
    fn verifies_hashed_password() {
        let hash = hash_password("Password1!").unwrap();

        assert!(verify_password("Password1!", &hash).unwrap());
        assert!(!verify_password("Password2!", &hash).unwrap());
    }

    /// Expect two hashes of the same password to differ by salt
    #[test]
    fn salts_every_hash() {
        let first = hash_password("Password1!").unwrap();
        let second = hash_password("Password1!").unwrap();

        assert_ne!(first, second);
    }

    /// Expect an error for a stored value that is not a PHC string
    #[test]
    fn rejects_unreadable_hash() {
        let result = verify_password("Password1!", "plain-text");

        assert!(result.is_err());
    }
}
