use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Hash checked when the username is unknown, so both login failures cost one argon2 run.
    static ref DUMMY_HASH: String = hash_password("otel-kayit-dummy").unwrap_or_default();
}

fn argon2_error(op: &'static str, e: password_hash::Error) -> anyhow::Error {
    error!(error = %e, op, "argon2 failure");
    anyhow::anyhow!("{op}: {e}")
}

/// Salted argon2id hash in PHC string form, stored in `users.password`.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| argon2_error("hash password", e))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| argon2_error("parse stored hash", e))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Runs a verification that always fails, matching the cost of a real one.
pub fn verify_dummy(plain: &str) {
    let _ = verify_password(plain, &DUMMY_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted() {
        let a = hash_password("şifre123").expect("hashing should succeed");
        let b = hash_password("şifre123").expect("hashing should succeed");
        assert_ne!(a, b);
        assert!(verify_password("şifre123", &a).expect("verify should succeed"));
        assert!(verify_password("şifre123", &b).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse").expect("hashing should succeed");
        assert!(!verify_password("wrong-horse", &hash).expect("verify should not error"));
    }

    #[test]
    fn dummy_hash_is_a_real_hash_that_never_matches() {
        assert!(!verify_password("otel-kayit", &DUMMY_HASH).expect("dummy hash parses"));
        verify_dummy("anything");
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
