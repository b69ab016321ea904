use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Hashes a password into an Argon2id PHC string.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("No se pudo procesar la contraseña: {}", e)))
}

/// A stored value that is not a valid PHC string never matches.
pub fn password_matches(plain: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("clave-segura").unwrap();
        assert_ne!(hash, "clave-segura");
        assert!(hash.starts_with("$argon2"));
        assert!(password_matches("clave-segura", &hash));
        assert!(!password_matches("otra-clave", &hash));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!password_matches("x", "not-a-phc-string"));
    }
}
