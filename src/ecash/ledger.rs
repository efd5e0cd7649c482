//! Bank-side record of deposited coins.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};
use uuid::Uuid;

use super::auditor::{determine_cheater, Verdict};
use super::merchant::ChallengeResponse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepositOutcome {
    /// First deposit of this coin; it has been credited.
    Fresh,
    /// The coin was deposited before. The new response was compared against the recorded one.
    Duplicate(Verdict),
}

/// Thread-safe map from coin guid to the first challenge response deposited with it.
#[derive(Debug, Default)]
pub struct DepositLedger {
    deposits: RwLock<HashMap<Uuid, ChallengeResponse>>,
}

impl DepositLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a deposit. Lookup and insert happen under one write lock, so concurrent
    /// deposits of the same coin see exactly one `Fresh`.
    pub fn deposit(&self, guid: Uuid, response: ChallengeResponse) -> DepositOutcome {
        let mut deposits = self
            .deposits
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match deposits.get(&guid) {
            Some(recorded) => DepositOutcome::Duplicate(determine_cheater(&guid, recorded, &response)),
            None => {
                debug!(guid = %guid.simple(), "recording deposit");
                deposits.insert(guid, response);
                info!(guid = %guid.simple(), total = deposits.len(), "coin deposited");
                DepositOutcome::Fresh
            }
        }
    }

    pub fn contains(&self, guid: &Uuid) -> bool {
        self.deposits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(guid)
    }

    pub fn recorded(&self, guid: &Uuid) -> Option<ChallengeResponse> {
        self.deposits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(guid)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.deposits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
