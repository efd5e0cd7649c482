/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Anonymous coins with cut-and-choose double-spend detection.
//!
//! The spender commits to `ris_length` pairs of identity shares, has the bank blind-sign a coin
//! over the share hashes, and answers one half of every pair on each deposit. Two deposits of
//! the same coin almost surely disclose both halves of some pair, which reveals the spender.

pub mod auditor;
pub mod bank;
pub mod coin;
pub mod errors;
pub mod identity;
pub mod ledger;
pub mod merchant;
pub mod wire;

pub use self::auditor::{determine_cheater, Verdict};
pub use self::bank::{Bank, BankKey};
pub use self::coin::{Coin, CoinRequest};
pub use self::errors::{EcashError, Result};
pub use self::identity::{IdentityCommitment, RisHolder, Side};
pub use self::ledger::{DepositLedger, DepositOutcome};
pub use self::merchant::{ChallengeResponse, Merchant};
pub use self::wire::{parse_coin, CoinContent, BANK_MARKER};
