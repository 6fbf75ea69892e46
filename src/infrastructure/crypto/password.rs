//! Password hashing for stored user credentials

use bcrypt::{hash, verify, BcryptError};

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, BcryptError> {
        hash(password, self.cost)
    }

    pub fn verify(&self, password: &str, hashed: &str) -> Result<bool, BcryptError> {
        verify(password, hashed)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("s3cret").unwrap();
        assert_ne!(hashed, "s3cret");
        assert!(hasher.verify("s3cret", &hashed).unwrap());
        assert!(!hasher.verify("other", &hashed).unwrap());
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(PasswordHasher::new(99).hash("pw").is_err());
    }
}
