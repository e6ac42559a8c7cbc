use std::time::Duration;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Upper bound on a single argon2 operation. Hashing runs on the blocking
/// pool; a hang must surface as an error, not block the request forever.
const HASH_TIMEOUT: Duration = Duration::from_secs(5);

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Hash off the async runtime with a bounded wait.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    let task = tokio::task::spawn_blocking(move || hash_password(&plain));
    tokio::time::timeout(HASH_TIMEOUT, task)
        .await
        .map_err(|_| anyhow::anyhow!("password hashing timed out"))??
}

/// Verify off the async runtime with a bounded wait.
pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    let task = tokio::task::spawn_blocking(move || verify_password(&plain, &hash));
    tokio::time::timeout(HASH_TIMEOUT, task)
        .await
        .map_err(|_| anyhow::anyhow!("password verification timed out"))??
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn blocking_wrappers_roundtrip() {
        let hash = hash_password_blocking("secret1".into())
            .await
            .expect("hash");
        assert!(verify_password_blocking("secret1".into(), hash.clone())
            .await
            .expect("verify"));
        assert!(!verify_password_blocking("secret2".into(), hash)
            .await
            .expect("verify"));
    }
}
