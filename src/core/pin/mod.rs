//! PIN hashing for debit authorization
//!
//! This module hashes and verifies the optional wallet PIN. PINs are stored
//! as Argon2id PHC strings; the raw digits live only in zeroized buffers.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

use crate::shared::constants::{
    ARGON2_MEMORY_COST, ARGON2_PARALLELISM, ARGON2_TIME_COST, PIN_HASH_LENGTH, PIN_SALT_LENGTH,
};
use crate::shared::error::LedgerError;
use crate::shared::types::LedgerResult;

fn argon2() -> LedgerResult<Argon2<'static>> {
    let params = Params::new(
        ARGON2_MEMORY_COST,
        ARGON2_TIME_COST,
        ARGON2_PARALLELISM,
        Some(PIN_HASH_LENGTH),
    )
    .map_err(|err| LedgerError::internal(format!("Argon2 params error: {}", err)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a PIN into a PHC string for at-rest storage
pub fn hash_pin(pin: &str) -> LedgerResult<String> {
    let pin = Zeroizing::new(pin.to_owned());

    let mut salt = [0u8; PIN_SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let salt_str = SaltString::encode_b64(&salt)?;

    let hash = argon2()?.hash_password(pin.as_bytes(), &salt_str)?;
    Ok(hash.to_string())
}

/// Verify a PIN against a stored PHC string.
/// The hash string encodes its own parameters.
pub fn verify_pin(pin: &str, hash: &str) -> LedgerResult<bool> {
    let pin = Zeroizing::new(pin.to_owned());
    let parsed = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(pin.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_pin() {
        let hash = hash_pin("1234").expect("hash pin");

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_pin("1234", &hash).expect("verify pin"));
        assert!(!verify_pin("4321", &hash).expect("verify wrong pin"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_pin("123456").expect("hash pin");
        let second = hash_pin("123456").expect("hash pin");

        assert_ne!(first, second);
        assert!(verify_pin("123456", &first).expect("verify first"));
        assert!(verify_pin("123456", &second).expect("verify second"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_pin("1234", "not a phc string").is_err());
    }
}
