/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Chaum's RSA blind signature.
//!
//! The requester blinds the digest `m` of its message with a random `r` coprime to `n`:
//! `m' = m * r^e mod n`. The signer returns `s' = m'^d mod n` without learning `m`, and the
//! requester unblinds `s = s' * r^-1 mod n`, which is an ordinary RSA signature on `m`:
//! `s^e = m mod n`.

use std::fmt;

use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use crate::arithmetic::*;
use crate::cryptographic_primitives::hashing::DigestExt;

/// Public exponent used for every generated key
pub const PUBLIC_EXPONENT: u32 = 65537;
/// Smallest modulus accepted by [RsaKeyPair::generate]; keeps a SHA-256 digest below `n`
pub const MIN_KEY_BITS: usize = 512;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlindSignatureError {
    #[error("RSA modulus must be an even number of bits, at least 512; got {0}")]
    InvalidKeySize(usize),
    #[error("private exponent does not invert the public exponent")]
    InconsistentKey,
    #[error("RSA public key needs an odd modulus above 2 and a positive exponent")]
    InvalidPublicKey,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RsaPublicKey {
    pub n: BigInt,
    pub e: BigInt,
}

impl RsaPublicKey {
    /// Whether the key can be used for blinding and verification at all. Says nothing about
    /// the key being hard to factor.
    pub fn is_well_formed(&self) -> bool {
        self.n > BigInt::from(2u32) && self.n.is_odd() && self.e > BigInt::zero()
    }

    fn check(&self) -> Result<(), BlindSignatureError> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(BlindSignatureError::InvalidPublicKey)
        }
    }
}

/// RSA signing key. The private exponent is wiped on drop.
#[derive(Clone)]
pub struct RsaKeyPair {
    public: RsaPublicKey,
    d: BigInt,
}

impl RsaKeyPair {
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(
        bits: usize,
        rng: &mut R,
    ) -> Result<Self, BlindSignatureError> {
        if bits < MIN_KEY_BITS || bits % 2 != 0 {
            return Err(BlindSignatureError::InvalidKeySize(bits));
        }
        let e = BigInt::from(PUBLIC_EXPONENT);
        loop {
            let p = BigInt::generate_prime(bits / 2, rng);
            let q = BigInt::generate_prime(bits / 2, rng);
            if p == q {
                continue;
            }
            let phi = (&p - &BigInt::one()) * (&q - &BigInt::one());
            let d = match BigInt::mod_inv(&e, &phi) {
                Some(d) => d,
                None => continue,
            };
            let n = p * q;
            debug!(bits = n.bit_length(), "generated RSA blind-signing key");
            return Ok(RsaKeyPair {
                public: RsaPublicKey { n, e },
                d,
            });
        }
    }

    /// Rebuilds a key from its components, checking that `d` inverts `e` on a test value.
    pub fn from_parts(n: BigInt, e: BigInt, d: BigInt) -> Result<Self, BlindSignatureError> {
        let public = RsaPublicKey { n, e };
        if !public.is_well_formed() || d <= BigInt::zero() {
            return Err(BlindSignatureError::InconsistentKey);
        }
        let witness = BigInt::from(2u32);
        let round_trip = BigInt::mod_pow(
            &BigInt::mod_pow(&witness, &public.e, &public.n),
            &d,
            &public.n,
        );
        if round_trip != witness {
            return Err(BlindSignatureError::InconsistentKey);
        }
        Ok(RsaKeyPair { public, d })
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }
}

impl Drop for RsaKeyPair {
    fn drop(&mut self) {
        self.d.zeroize();
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// The secret `r` a requester needs to unblind the signer's answer.
pub struct BlindingFactor(BigInt);

impl Drop for BlindingFactor {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for BlindingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlindingFactor(..)")
    }
}

/// Full-domain digest of `message`: `SHA-256(message) mod n`
pub fn message_digest(
    message: &[u8],
    public_key: &RsaPublicKey,
) -> Result<BigInt, BlindSignatureError> {
    public_key.check()?;
    Ok(Sha256::digest_bigint(message).modulus(&public_key.n))
}

pub fn blind<R: RngCore + CryptoRng + ?Sized>(
    digest: &BigInt,
    public_key: &RsaPublicKey,
    rng: &mut R,
) -> Result<(BigInt, BlindingFactor), BlindSignatureError> {
    public_key.check()?;
    let n = &public_key.n;
    let r = loop {
        let r = BigInt::sample_range(&BigInt::from(2u32), n, rng);
        if r.gcd(n) == BigInt::one() {
            break r;
        }
    };
    let blinded = BigInt::mod_mul(digest, &BigInt::mod_pow(&r, &public_key.e, n), n);
    Ok((blinded, BlindingFactor(r)))
}

/// Signer side: `blinded^d mod n`
pub fn sign(blinded: &BigInt, key: &RsaKeyPair) -> BigInt {
    BigInt::mod_pow(blinded, &key.d, &key.public.n)
}

pub fn unblind(
    blind_signature: &BigInt,
    factor: &BlindingFactor,
    public_key: &RsaPublicKey,
) -> BigInt {
    let n = &public_key.n;
    if !public_key.is_well_formed() {
        return BigInt::zero();
    }
    // `blind` only hands out factors coprime to n, so the inverse exists for matching keys
    match BigInt::mod_inv(&factor.0, n) {
        Some(r_inv) => BigInt::mod_mul(blind_signature, &r_inv, n),
        None => BigInt::zero(),
    }
}

pub fn verify(signature: &BigInt, public_key: &RsaPublicKey, message: &[u8]) -> bool {
    let n = &public_key.n;
    if NumberTests::is_negative(signature) || signature >= n {
        return false;
    }
    match message_digest(message, public_key) {
        Ok(digest) => BigInt::mod_pow(signature, &public_key.e, n) == digest,
        Err(_) => false,
    }
}
