//! Password hashing for stored accounts.
//!
//! Credentials are argon2id PHC strings (`$argon2id$v=19$…`) with a random
//! salt per password. Verification reads the parameters back out of the PHC
//! string, so changing the cost only affects newly written hashes.

use argon2::{
  Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
  PasswordHasher as _, password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Hashes and verifies account passwords.
#[derive(Clone, Default)]
pub struct CredentialHasher {
  argon2: Argon2<'static>,
}

impl CredentialHasher {
  /// argon2id with a custom memory cost (KiB) and iteration count, single
  /// lane.
  pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self> {
    let params = Params::new(memory_kib, iterations, 1, None)
      .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Self { argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
  }

  pub fn hash(&self, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(
      self
        .argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?
        .to_string(),
    )
  }

  /// Constant-time check of `password` against a stored PHC string. A
  /// malformed stored hash never verifies.
  pub fn verify(&self, password: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
      return false;
    };
    self.argon2.verify_password(password.as_bytes(), &parsed).is_ok()
  }
}
