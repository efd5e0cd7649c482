use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::errors::{EcashError, Result};
use crate::arithmetic::BigInt;
use crate::cryptographic_primitives::blind_signatures::rsa::{self, RsaKeyPair, RsaPublicKey};

/// The bank's signing keypair `{n, e, d}`
pub type BankKey = RsaKeyPair;

/// Coin issuer. Signs blinded coin digests and never sees coin contents.
#[derive(Debug)]
pub struct Bank {
    key: BankKey,
}

impl Bank {
    pub fn new(key: BankKey) -> Self {
        Bank { key }
    }

    pub fn generate<R: RngCore + CryptoRng + ?Sized>(key_bits: usize, rng: &mut R) -> Result<Self> {
        let key = RsaKeyPair::generate(key_bits, rng)
            .map_err(|e| EcashError::InvalidParameter(e.to_string()))?;
        Ok(Bank::new(key))
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        self.key.public_key()
    }

    /// Returns the blind signature share for the spender to unblind.
    pub fn sign(&self, blinded_digest: &BigInt) -> BigInt {
        debug!("signing blinded coin digest");
        rsa::sign(blinded_digest, &self.key)
    }
}
