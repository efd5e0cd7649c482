use rand::{CryptoRng, Rng, RngCore};
use serde_derive::{Deserialize, Serialize};
use tracing::{info, warn};

use super::coin::Coin;
use super::errors::{EcashError, Result};
use super::identity::{share_hash, RisHolder, Side};
use super::wire::parse_coin;
use crate::cryptographic_primitives::blind_signatures::rsa::RsaPublicKey;

/// One share per slot, each the half the merchant asked for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ChallengeResponse {
    shares: Vec<Vec<u8>>,
}

impl ChallengeResponse {
    pub fn new(shares: Vec<Vec<u8>>) -> Self {
        ChallengeResponse { shares }
    }

    pub fn shares(&self) -> &[Vec<u8>] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.shares.iter().map(hex::encode).collect()
    }
}

impl TryFrom<Vec<String>> for ChallengeResponse {
    type Error = hex::FromHexError;

    fn try_from(shares: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let shares = shares
            .iter()
            .map(hex::decode)
            .collect::<std::result::Result<_, _>>()?;
        Ok(ChallengeResponse { shares })
    }
}

impl From<ChallengeResponse> for Vec<String> {
    fn from(response: ChallengeResponse) -> Self {
        response.to_hex()
    }
}

/// Accepts coins by checking the bank signature and challenging the spender for one half
/// of every identity slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merchant {
    bank_key: RsaPublicKey,
    ris_length: usize,
}

impl Merchant {
    /// A merchant that only takes coins signed with `bank_key`.
    pub fn new(bank_key: RsaPublicKey, ris_length: usize) -> Self {
        Merchant {
            bank_key,
            ris_length,
        }
    }

    /// Verifies `coin` and runs the cut-and-choose challenge against `holder`.
    ///
    /// The returned response goes to the bank with the coin for deposit. Challenges are drawn
    /// from `rng`, so two deposits of the same coin almost surely ask for different halves.
    pub fn accept<H, R>(&self, coin: &Coin, holder: &H, rng: &mut R) -> Result<ChallengeResponse>
    where
        H: RisHolder + ?Sized,
        R: RngCore + CryptoRng + ?Sized,
    {
        let guid = coin.guid.simple();
        if coin.n != self.bank_key.n || coin.e != self.bank_key.e {
            warn!(%guid, "rejected coin: not issued under the bank key");
            return Err(EcashError::InvalidSignature);
        }
        if !coin.verify_signature() {
            warn!(%guid, "rejected coin: bad bank signature");
            return Err(EcashError::InvalidSignature);
        }

        let content = parse_coin(&coin.to_string()).map_err(|e| {
            warn!(%guid, error = %e, "rejected coin");
            e
        })?;
        if content.left_hashes.len() != self.ris_length {
            warn!(%guid, slots = content.left_hashes.len(), "rejected coin: wrong RIS length");
            return Err(EcashError::MalformedCoin(format!(
                "coin commits to {} identity slots, expected {}",
                content.left_hashes.len(),
                self.ris_length
            )));
        }

        let mut shares = Vec::with_capacity(self.ris_length);
        for slot in 0..self.ris_length {
            let (side, committed) = if rng.gen::<bool>() {
                (Side::Left, &content.left_hashes[slot])
            } else {
                (Side::Right, &content.right_hashes[slot])
            };
            let share = match holder.reveal(slot, side) {
                Some(share) if share_hash(share) == *committed => share,
                _ => {
                    warn!(%guid, slot, ?side, "rejected coin: revealed share does not match commitment");
                    return Err(EcashError::HashMismatch { slot });
                }
            };
            shares.push(share.to_vec());
        }

        info!(%guid, amount = content.amount, "accepted coin");
        Ok(ChallengeResponse::new(shares))
    }
}
