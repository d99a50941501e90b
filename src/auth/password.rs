//! Password hashing and verification for Gatehouse.
//!
//! Uses bcrypt with a configurable cost factor.

use thiserror::Error;

/// Default bcrypt cost factor.
pub const DEFAULT_COST: u32 = 10;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// The blocking hash task did not complete.
    #[error("password task failed: {0}")]
    TaskFailed(String),
}

/// Salted one-way password hasher.
///
/// The synchronous methods are CPU-bound; async callers go through
/// [`CredentialHasher::hash_async`] and [`CredentialHasher::verify_async`],
/// which run on tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialHasher {
    /// Create a hasher with the given bcrypt cost factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// The configured cost factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password.
    ///
    /// Returns a modular-crypt string (`$2b$<cost>$...`) embedding the salt.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatehouse::CredentialHasher;
    ///
    /// let hasher = CredentialHasher::new(4);
    /// let hash = hasher.hash("my_secure_password").unwrap();
    /// assert!(hash.starts_with("$2b$04$"));
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashError(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A malformed hash is a verification failure, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatehouse::CredentialHasher;
    ///
    /// let hasher = CredentialHasher::new(4);
    /// let hash = hasher.hash("my_secure_password").unwrap();
    /// assert!(hasher.verify("my_secure_password", &hash));
    /// assert!(!hasher.verify("wrong_password", &hash));
    /// assert!(!hasher.verify("anything", "not-a-hash"));
    /// ```
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!("Rejecting malformed password hash: {}", e);
                false
            }
        }
    }

    /// Hash a password on the blocking pool.
    pub async fn hash_async(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = *self;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
    }

    /// Verify a password on the blocking pool.
    pub async fn verify_async(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let hasher = *self;
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::TaskFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the suite fast.
    fn hasher() -> CredentialHasher {
        CredentialHasher::new(4)
    }

    #[test]
    fn test_hash_format() {
        let hash = hasher().hash("test_password_123").unwrap();

        assert!(hash.starts_with("$2b$04$"));
        assert_ne!(hash, "test_password_123");
    }

    #[test]
    fn test_default_cost() {
        let hasher = CredentialHasher::default();
        assert_eq!(hasher.cost(), 10);

        let hash = hasher.hash("secret123").unwrap();
        assert!(hash.starts_with("$2b$10$"));
    }

    #[test]
    fn test_hash_password_different_hashes() {
        let hasher = hasher();
        let hash1 = hasher.hash("same_password").unwrap();
        let hash2 = hasher.hash("same_password").unwrap();

        // Different salts
        assert_ne!(hash1, hash2);
        assert!(hasher.verify("same_password", &hash1));
        assert!(hasher.verify("same_password", &hash2));
    }

    #[test]
    fn test_verify_password_correct() {
        let hasher = hasher();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(hasher.verify("correct_password", &hash));
    }

    #[test]
    fn test_verify_password_wrong() {
        let hasher = hasher();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = hasher();

        assert!(!hasher.verify("any_password", "not_a_valid_hash"));
        assert!(!hasher.verify("any_password", ""));
        assert!(!hasher.verify("any_password", "$2b$99$garbage"));
    }

    #[test]
    fn test_verify_uses_embedded_cost() {
        let hash = CredentialHasher::new(5).hash("password").unwrap();

        // A hasher configured with another cost still verifies
        assert!(CredentialHasher::new(12).verify("password", &hash));
    }

    #[test]
    fn test_password_with_unicode() {
        let hasher = hasher();
        let hash = hasher.hash("パスワード123").unwrap();
        assert!(hasher.verify("パスワード123", &hash));
    }

    #[test]
    fn test_invalid_cost_is_error() {
        let result = CredentialHasher::new(99).hash("password");
        assert!(matches!(result, Err(PasswordError::HashError(_))));
    }

    #[tokio::test]
    async fn test_async_roundtrip() {
        let hasher = hasher();
        let hash = hasher.hash_async("secret123").await.unwrap();

        assert!(hasher.verify_async("secret123", &hash).await.unwrap());
        assert!(!hasher.verify_async("secret124", &hash).await.unwrap());
    }
}
