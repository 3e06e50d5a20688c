//! Password hashing

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::{
    config::HashingConfig,
    error::{ConfigError, InfraError},
};

/// PHC-format password hash (algorithm, version, cost, salt and digest)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedCredential(String);

impl HashedCredential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for HashedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashedCredential(..)")
    }
}

/// Argon2id hasher with a fixed work factor
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Build a hasher from configured cost parameters
    pub fn new(config: &HashingConfig) -> Result<Self, ConfigError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| ConfigError::InvalidHashParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Runs on the blocking pool; the work factor makes this deliberately slow.
    pub async fn hash(&self, password: &str) -> Result<HashedCredential, InfraError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        let hash = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| InfraError::Hashing(e.to_string()))?
        .map_err(|e| InfraError::Hashing(e.to_string()))?;

        Ok(HashedCredential(hash))
    }

    /// Verify a password against a stored hash
    pub fn verify(&self, password: &str, hashed: &HashedCredential) -> Result<bool, InfraError> {
        let parsed = PasswordHash::new(hashed.as_str())
            .map_err(|e| InfraError::Hashing(format!("Invalid password hash: {e}")))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
pub(crate) fn test_hashing_config() -> HashingConfig {
    HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}
