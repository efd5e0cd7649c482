/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Spender-side minting.
//!
//! ```text
//! spender                                   bank
//! IdentityCommitment::commit
//! CoinRequest::new  ---- blinded() ---->
//!                   <--- blind sig -----    Bank::sign
//! CoinRequest::finalize -> Coin
//! ```

use std::fmt;

use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::errors::{EcashError, Result};
use super::identity::IdentityCommitment;
use super::wire::CoinContent;
use crate::arithmetic::BigInt;
use crate::cryptographic_primitives::blind_signatures::rsa::{
    self, BlindSignatureError, BlindingFactor, RsaPublicKey,
};

/// A signed coin. Everything here is public; the spender identity stays in the
/// [IdentityCommitment] that produced the hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub amount: u64,
    pub guid: Uuid,
    pub left_hashes: Vec<String>,
    pub right_hashes: Vec<String>,
    pub n: BigInt,
    pub e: BigInt,
    pub signature: BigInt,
}

impl Coin {
    pub fn content(&self) -> CoinContent {
        CoinContent {
            amount: self.amount,
            guid: self.guid,
            left_hashes: self.left_hashes.clone(),
            right_hashes: self.right_hashes.clone(),
        }
    }

    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    /// Checks the bank signature over the canonical content against the embedded `(n, e)`.
    pub fn verify_signature(&self) -> bool {
        rsa::verify(
            &self.signature,
            &self.public_key(),
            self.to_string().as_bytes(),
        )
    }
}

/// Canonical content string, the message the bank signed
impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.content(), f)
    }
}

fn bank_key_error(e: BlindSignatureError) -> EcashError {
    EcashError::InvalidParameter(format!("bank key: {}", e))
}

/// A coin waiting for the bank's blind signature.
#[derive(Debug)]
pub struct CoinRequest {
    content: CoinContent,
    public_key: RsaPublicKey,
    blinded: BigInt,
    factor: BlindingFactor,
}

impl CoinRequest {
    pub fn new<R: RngCore + CryptoRng + ?Sized>(
        amount: u64,
        commitment: &IdentityCommitment,
        public_key: &RsaPublicKey,
        rng: &mut R,
    ) -> Result<Self> {
        if amount == 0 {
            return Err(EcashError::InvalidAmount);
        }
        if !public_key.is_well_formed() {
            return Err(bank_key_error(BlindSignatureError::InvalidPublicKey));
        }
        let mut guid = [0u8; 16];
        rng.fill_bytes(&mut guid);
        let content = CoinContent {
            amount,
            guid: uuid::Builder::from_random_bytes(guid).into_uuid(),
            left_hashes: commitment.left_hashes().to_vec(),
            right_hashes: commitment.right_hashes().to_vec(),
        };
        CoinRequest::from_content(content, public_key, rng)
    }

    /// Blinds arbitrary coin content. [CoinRequest::new] is the honest path.
    pub fn from_content<R: RngCore + CryptoRng + ?Sized>(
        content: CoinContent,
        public_key: &RsaPublicKey,
        rng: &mut R,
    ) -> Result<Self> {
        let digest = rsa::message_digest(content.to_string().as_bytes(), public_key)
            .map_err(bank_key_error)?;
        let (blinded, factor) = rsa::blind(&digest, public_key, rng).map_err(bank_key_error)?;
        debug!(guid = %content.guid.simple(), "blinded coin digest");
        Ok(CoinRequest {
            content,
            public_key: public_key.clone(),
            blinded,
            factor,
        })
    }

    pub fn guid(&self) -> Uuid {
        self.content.guid
    }

    pub fn content(&self) -> &CoinContent {
        &self.content
    }

    /// The only value the bank gets to see
    pub fn blinded(&self) -> &BigInt {
        &self.blinded
    }

    /// Unblinds the bank's answer and checks it is a valid signature on the coin.
    pub fn finalize(self, blind_signature: &BigInt) -> Result<Coin> {
        let signature = rsa::unblind(blind_signature, &self.factor, &self.public_key);
        let CoinRequest {
            content,
            public_key,
            ..
        } = self;
        let coin = Coin {
            amount: content.amount,
            guid: content.guid,
            left_hashes: content.left_hashes,
            right_hashes: content.right_hashes,
            n: public_key.n,
            e: public_key.e,
            signature,
        };
        if !coin.verify_signature() {
            return Err(EcashError::InvalidSignature);
        }
        debug!(guid = %coin.guid.simple(), amount = coin.amount, "minted coin");
        Ok(coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::{BitManipulation, One};
    use crate::ecash::wire::parse_coin;
    use crate::test_utils::{seeded_rng, test_bank};

    #[test]
    fn minted_coin_verifies_and_carries_commitments() {
        let bank = test_bank();
        let mut rng = seeded_rng(21);
        let commitment = IdentityCommitment::commit("alice", 10, &mut rng).unwrap();
        let request = CoinRequest::new(20, &commitment, bank.public_key(), &mut rng).unwrap();
        let blind_signature = bank.sign(request.blinded());
        let coin = request.finalize(&blind_signature).unwrap();

        assert!(coin.verify_signature());
        assert_eq!(coin.amount, 20);
        assert_eq!(coin.left_hashes, commitment.left_hashes());
        assert_eq!(coin.right_hashes, commitment.right_hashes());
        assert_eq!(&coin.public_key(), bank.public_key());
        assert_eq!(parse_coin(&coin.to_string()).unwrap(), coin.content());
    }

    #[test]
    fn bank_never_sees_the_coin_digest() {
        let bank = test_bank();
        let mut rng = seeded_rng(23);
        let commitment = IdentityCommitment::commit("alice", 3, &mut rng).unwrap();
        let request = CoinRequest::new(5, &commitment, bank.public_key(), &mut rng).unwrap();
        let digest = rsa::message_digest(
            request.content().to_string().as_bytes(),
            bank.public_key(),
        )
        .unwrap();
        assert_ne!(request.blinded(), &digest);
    }

    #[test]
    fn guids_are_fresh_per_request() {
        let bank = test_bank();
        let mut rng = seeded_rng(24);
        let commitment = IdentityCommitment::commit("alice", 2, &mut rng).unwrap();
        let first = CoinRequest::new(1, &commitment, bank.public_key(), &mut rng).unwrap();
        let second = CoinRequest::new(1, &commitment, bank.public_key(), &mut rng).unwrap();
        assert_ne!(first.guid(), second.guid());
        assert_eq!(first.guid().get_version_num(), 4);
    }

    #[test]
    fn wrong_blind_signature_is_rejected() {
        let bank = test_bank();
        let mut rng = seeded_rng(25);
        let commitment = IdentityCommitment::commit("alice", 2, &mut rng).unwrap();
        let request = CoinRequest::new(7, &commitment, bank.public_key(), &mut rng).unwrap();
        let mut blind_signature = bank.sign(request.blinded());
        let low = blind_signature.test_bit(0);
        blind_signature.set_bit(0, !low);
        assert_eq!(
            request.finalize(&blind_signature).unwrap_err(),
            EcashError::InvalidSignature
        );

        let request = CoinRequest::new(7, &commitment, bank.public_key(), &mut rng).unwrap();
        assert_eq!(
            request.finalize(&BigInt::one()).unwrap_err(),
            EcashError::InvalidSignature
        );
    }

    #[test]
    fn tampered_coin_no_longer_verifies() {
        let bank = test_bank();
        let mut rng = seeded_rng(26);
        let commitment = IdentityCommitment::commit("alice", 3, &mut rng).unwrap();
        let request = CoinRequest::new(20, &commitment, bank.public_key(), &mut rng).unwrap();
        let blind_signature = bank.sign(request.blinded());
        let coin = request.finalize(&blind_signature).unwrap();

        let mut inflated = coin.clone();
        inflated.amount = 2000;
        assert!(!inflated.verify_signature());

        let mut swapped = coin;
        swapped.left_hashes.swap(0, 1);
        assert!(!swapped.verify_signature());
    }

    #[test]
    fn coin_serializes_to_json() {
        let bank = test_bank();
        let mut rng = seeded_rng(27);
        let commitment = IdentityCommitment::commit("alice", 2, &mut rng).unwrap();
        let request = CoinRequest::new(3, &commitment, bank.public_key(), &mut rng).unwrap();
        let blind_signature = bank.sign(request.blinded());
        let coin = request.finalize(&blind_signature).unwrap();

        let json = serde_json::to_string(&coin).unwrap();
        let restored: Coin = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, coin);
        assert!(restored.verify_signature());
    }

    #[test]
    fn zero_amount_rejected() {
        let bank = test_bank();
        let mut rng = seeded_rng(22);
        let commitment = IdentityCommitment::commit("alice", 4, &mut rng).unwrap();
        assert_eq!(
            CoinRequest::new(0, &commitment, bank.public_key(), &mut rng).unwrap_err(),
            EcashError::InvalidAmount
        );
    }

    #[test]
    fn degenerate_bank_key_is_an_invalid_parameter() {
        let mut rng = seeded_rng(28);
        let commitment = IdentityCommitment::commit("alice", 2, &mut rng).unwrap();
        for n in [0u32, 1, 2, 3232] {
            let key = RsaPublicKey {
                n: BigInt::from(n),
                e: BigInt::from(3u32),
            };
            assert!(
                matches!(
                    CoinRequest::new(1, &commitment, &key, &mut rng),
                    Err(EcashError::InvalidParameter(_))
                ),
                "n = {}",
                n
            );
            let content = CoinContent {
                amount: 1,
                guid: Uuid::from_u128(28),
                left_hashes: commitment.left_hashes().to_vec(),
                right_hashes: commitment.right_hashes().to_vec(),
            };
            assert!(matches!(
                CoinRequest::from_content(content, &key, &mut rng),
                Err(EcashError::InvalidParameter(_))
            ));
        }
    }
}
