use std::fmt;

use serde_derive::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::identity::{decode_identity, xor_bytes};
use super::merchant::ChallengeResponse;

/// Outcome of comparing two challenge responses recorded for the same coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The responses are identical: the same deposit was submitted twice.
    NoConflict,
    /// The spender answered two different challenges; the halves at `slot` reveal who.
    IdentityRevealed { identity: String, slot: usize },
    /// The responses differ at `slot` but do not combine to an identity.
    MerchantCheated { slot: usize },
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NoConflict => write!(f, "no conflict: same response submitted twice"),
            Verdict::IdentityRevealed { identity, .. } => {
                write!(f, "double spent by {}", identity)
            }
            Verdict::MerchantCheated { slot } => {
                write!(f, "merchant cheated: responses diverge at slot {}", slot)
            }
        }
    }
}

/// Decides who is to blame for two deposits of coin `guid`.
///
/// Only the first slot at which the responses differ is examined.
pub fn determine_cheater(guid: &Uuid, first: &ChallengeResponse, second: &ChallengeResponse) -> Verdict {
    let guid = guid.simple();
    let (a, b) = (first.shares(), second.shares());

    let divergent = a.iter().zip(b.iter()).position(|(x, y)| x != y);
    let verdict = match divergent {
        Some(slot) => match decode_identity(&xor_bytes(&a[slot], &b[slot])) {
            Some(identity) => Verdict::IdentityRevealed { identity, slot },
            None => Verdict::MerchantCheated { slot },
        },
        // one response is a prefix of the other
        None if a.len() != b.len() => Verdict::MerchantCheated {
            slot: a.len().min(b.len()),
        },
        None => Verdict::NoConflict,
    };

    match &verdict {
        Verdict::NoConflict => info!(%guid, "duplicate deposit, responses identical"),
        Verdict::IdentityRevealed { identity, slot } => {
            warn!(%guid, %identity, slot, "coin double spent")
        }
        Verdict::MerchantCheated { slot } => warn!(%guid, slot, "merchant cheated"),
    }
    verdict
}
