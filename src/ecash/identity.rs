/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Random identity strings (RIS).
//!
//! Every slot splits the tagged identity `IDENT:<identity>` into two one-time-pad halves. Either
//! half alone is uniformly random; both halves of the same slot XOR back to the identity.

use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroize;

use super::errors::{EcashError, Result};
use crate::cryptographic_primitives::hashing::DigestExt;

/// Tag that marks a reconstructed secret as a spender identity
pub const IDENT_PREFIX: &str = "IDENT";
/// Length in bytes of every secret share
pub const IDENTITY_SHARE_LEN: usize = 64;

type Share = [u8; IDENTITY_SHARE_LEN];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Whoever holds the secret shares of a coin and answers the merchant's challenges.
pub trait RisHolder {
    fn reveal(&self, slot: usize, side: Side) -> Option<&[u8]>;
}

/// `IDENT:<identity>`, zero padded to [IDENTITY_SHARE_LEN] bytes.
pub fn encode_identity(identity: &str) -> Result<Share> {
    if identity.is_empty() {
        return Err(EcashError::EncodingError("identity is empty".to_owned()));
    }
    if identity.as_bytes().contains(&0) {
        return Err(EcashError::EncodingError(
            "identity contains a NUL byte".to_owned(),
        ));
    }
    let tagged = format!("{}:{}", IDENT_PREFIX, identity);
    if tagged.len() > IDENTITY_SHARE_LEN {
        return Err(EcashError::EncodingError(format!(
            "tagged identity is {} bytes, shares hold {}",
            tagged.len(),
            IDENTITY_SHARE_LEN
        )));
    }
    let mut encoded = [0u8; IDENTITY_SHARE_LEN];
    encoded[..tagged.len()].copy_from_slice(tagged.as_bytes());
    Ok(encoded)
}

/// Inverse of [encode_identity]; `None` if `secret` is not a tagged identity.
pub fn decode_identity(secret: &[u8]) -> Option<String> {
    let end = secret.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let text = std::str::from_utf8(&secret[..end]).ok()?;
    let identity = text.strip_prefix(IDENT_PREFIX)?.strip_prefix(':')?;
    if identity.is_empty() {
        None
    } else {
        Some(identity.to_owned())
    }
}

/// Lowercase hex SHA-256 of a share, as committed to in the coin
pub fn share_hash(share: &[u8]) -> String {
    Sha256::digest_hex(share)
}

pub(crate) fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| a.get(i).copied().unwrap_or(0) ^ b.get(i).copied().unwrap_or(0))
        .collect()
}

/// The spender's secret half of a coin: the identity shares and their hash commitments.
pub struct IdentityCommitment {
    identity: String,
    left: Vec<Share>,
    right: Vec<Share>,
    left_hashes: Vec<String>,
    right_hashes: Vec<String>,
}

impl IdentityCommitment {
    pub fn commit<R: RngCore + CryptoRng + ?Sized>(
        identity: &str,
        ris_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut secret = encode_identity(identity)?;
        if ris_length == 0 {
            return Err(EcashError::InvalidParameter(
                "ris_length must be at least 1".to_owned(),
            ));
        }

        let mut left = Vec::with_capacity(ris_length);
        let mut right = Vec::with_capacity(ris_length);
        for _ in 0..ris_length {
            let mut pad = [0u8; IDENTITY_SHARE_LEN];
            rng.fill_bytes(&mut pad);
            let mut other = [0u8; IDENTITY_SHARE_LEN];
            for (o, (p, s)) in other.iter_mut().zip(pad.iter().zip(secret.iter())) {
                *o = p ^ s;
            }
            left.push(pad);
            right.push(other);
        }
        secret.zeroize();

        let left_hashes = left.iter().map(|s| share_hash(s)).collect();
        let right_hashes = right.iter().map(|s| share_hash(s)).collect();
        debug!(ris_length, "committed to identity shares");

        Ok(IdentityCommitment {
            identity: identity.to_owned(),
            left,
            right,
            left_hashes,
            right_hashes,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn ris_length(&self) -> usize {
        self.left.len()
    }

    pub fn left_hashes(&self) -> &[String] {
        &self.left_hashes
    }

    pub fn right_hashes(&self) -> &[String] {
        &self.right_hashes
    }
}

impl RisHolder for IdentityCommitment {
    fn reveal(&self, slot: usize, side: Side) -> Option<&[u8]> {
        let shares = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        shares.get(slot).map(|s| &s[..])
    }
}

impl Drop for IdentityCommitment {
    fn drop(&mut self) {
        for share in self.left.iter_mut().chain(self.right.iter_mut()) {
            share.zeroize();
        }
        self.identity.zeroize();
    }
}
