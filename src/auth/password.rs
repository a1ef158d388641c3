use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid hashing parameters: {0}")]
    Params(String),
    #[error("hash error: {0}")]
    Hash(String),
    #[error("stored hash is not a valid PHC string")]
    InvalidHash,
    #[error("hashing task failed: {0}")]
    Task(String),
}

/// Salted Argon2id hashing. Hashes are PHC strings carrying their own salt and
/// parameters, so changing the configured cost never invalidates stored hashes.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, PasswordError> {
        Self::new(config.password_memory_kib, config.password_iterations)
    }

    pub fn hash_blocking(&self, plain: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|p| p.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Returns `Ok(false)` on mismatch and `Err(InvalidHash)` when the stored
    /// value cannot be parsed.
    pub fn verify_blocking(&self, plain: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;
        Ok(self.argon2.verify_password(plain.as_bytes(), &parsed).is_ok())
    }

    /// Hash on the blocking pool so request workers are not stalled
    pub async fn hash(&self, plain: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&plain))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    pub async fn verify(&self, plain: String, hash: String) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&plain, &hash))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(1024, 1).unwrap()
    }

    #[test]
    fn hash_is_salted_and_verifiable() {
        let hasher = hasher();
        let first = hasher.hash_blocking("Passw0rd!").unwrap();
        let second = hasher.hash_blocking("Passw0rd!").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("Passw0rd!"));
        assert!(hasher.verify_blocking("Passw0rd!", &first).unwrap());
        assert!(!hasher.verify_blocking("passw0rd!", &first).unwrap());
    }

    #[test]
    fn corrupt_hash_is_an_error() {
        let err = hasher().verify_blocking("Passw0rd!", "not-a-hash").unwrap_err();
        assert!(matches!(err, PasswordError::InvalidHash));
    }

    #[test]
    fn hashes_verify_across_cost_changes() {
        let hash = PasswordHasher::new(2048, 2).unwrap().hash_blocking("Passw0rd!").unwrap();
        assert!(hasher().verify_blocking("Passw0rd!", &hash).unwrap());
    }

    #[tokio::test]
    async fn async_wrappers_run_on_blocking_pool() {
        let hasher = hasher();
        let hash = hasher.hash("Secret123".to_string()).await.unwrap();
        assert!(hasher.verify("Secret123".to_string(), hash).await.unwrap());
    }
}
