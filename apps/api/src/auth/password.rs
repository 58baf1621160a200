use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hashes with Argon2id and a random salt. Returns the PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing error: {e}")))
}

/// `false` for a wrong password and for an unreadable stored hash alike.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Stand-in hash verified when no account matches, so an unknown email
/// costs the same Argon2 work as a wrong password.
pub fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("no-such-account").unwrap_or_default())
}

/// Sign-up rules: an address with `@`, and a password of at least 8 characters.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("samepassword").unwrap();
        let b = hash_password("samepassword").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_dummy_hash_is_a_real_hash_that_rejects_input() {
        let hash = dummy_hash();
        assert!(PasswordHash::new(hash).is_ok());
        assert!(!verify_password("hunter22", hash));
        assert_eq!(dummy_hash(), hash);
    }

    #[test]
    fn test_credential_rules() {
        assert!(validate_credentials("ada@example.com", "longenough").is_ok());
        assert!(matches!(
            validate_credentials("ada.example.com", "longenough"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_credentials("ada@example.com", "short"),
            Err(AppError::Validation(_))
        ));
    }
}
