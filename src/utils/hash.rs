use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::middleware::error::{AppError, AppResult};

pub fn hash_password(pwd: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pwd.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AppError::Generic {
            description: format!("Password hashing failed: {err}"),
        })
}

pub fn verify_password(hash: &str, pwd: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(pwd.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}
