//! Canonical coin content string: `<marker>-<amount>-<guid>-<left hashes>-<right hashes>`.
//!
//! This string is exactly what the bank signs, so formatting and parsing must agree byte for byte.

use std::fmt;

use uuid::Uuid;

use super::errors::{EcashError, Result};

/// Marker identifying coins minted by this bank
pub const BANK_MARKER: &str = "ELECTRONIC_PIGGYBANK";

const FIELD_SEPARATOR: char = '-';
const HASH_SEPARATOR: &str = ",";
const GUID_HEX_LEN: usize = 32;
const HASH_HEX_LEN: usize = 64;

/// The signed, public content of a coin
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinContent {
    pub amount: u64,
    pub guid: Uuid,
    pub left_hashes: Vec<String>,
    pub right_hashes: Vec<String>,
}

impl fmt::Display for CoinContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{marker}{sep}{amount}{sep}{guid}{sep}{left}{sep}{right}",
            marker = BANK_MARKER,
            sep = FIELD_SEPARATOR,
            amount = self.amount,
            guid = self.guid.simple(),
            left = self.left_hashes.join(HASH_SEPARATOR),
            right = self.right_hashes.join(HASH_SEPARATOR),
        )
    }
}

fn malformed(reason: impl Into<String>) -> EcashError {
    EcashError::MalformedCoin(reason.into())
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn parse_hashes(field: &str, which: &str) -> Result<Vec<String>> {
    let hashes: Vec<String> = field.split(HASH_SEPARATOR).map(str::to_owned).collect();
    if let Some(position) = hashes.iter().position(|h| !is_lower_hex(h, HASH_HEX_LEN)) {
        return Err(malformed(format!(
            "{} hash {} is not {} lowercase hex digits",
            which, position, HASH_HEX_LEN
        )));
    }
    Ok(hashes)
}

/// Parses a canonical coin string, rejecting anything this bank would not have produced.
pub fn parse_coin(s: &str) -> Result<CoinContent> {
    let fields: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
    let (marker, amount, guid, left, right) = match fields.as_slice() {
        [marker, amount, guid, left, right] => (*marker, *amount, *guid, *left, *right),
        _ => {
            return Err(malformed(format!(
                "expected 5 fields, found {}",
                fields.len()
            )))
        }
    };

    if marker != BANK_MARKER {
        return Err(malformed(format!(
            "Invalid identity string: {} received, but {} expected",
            marker, BANK_MARKER
        )));
    }

    // exactly the digits `u64`'s Display produces: no sign, no leading zeros
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(format!("amount {:?} is not a decimal number", amount)));
    }
    if amount.starts_with('0') {
        return Err(malformed(format!("amount {:?} is zero or zero-padded", amount)));
    }
    let amount: u64 = amount
        .parse()
        .map_err(|_| malformed(format!("amount {:?} does not fit in 64 bits", amount)))?;

    if !is_lower_hex(guid, GUID_HEX_LEN) {
        return Err(malformed(format!("guid {:?} is not 32 lowercase hex digits", guid)));
    }
    let guid = Uuid::parse_str(guid).map_err(|e| malformed(format!("guid: {}", e)))?;

    let left_hashes = parse_hashes(left, "left")?;
    let right_hashes = parse_hashes(right, "right")?;
    if left_hashes.len() != right_hashes.len() {
        return Err(malformed(format!(
            "{} left hashes but {} right hashes",
            left_hashes.len(),
            right_hashes.len()
        )));
    }

    Ok(CoinContent {
        amount,
        guid,
        left_hashes,
        right_hashes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecash::identity::share_hash;

    fn sample_content() -> CoinContent {
        CoinContent {
            amount: 20,
            guid: Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef),
            left_hashes: vec![share_hash(b"l0"), share_hash(b"l1")],
            right_hashes: vec![share_hash(b"r0"), share_hash(b"r1")],
        }
    }

    #[test]
    fn canonical_string_layout() {
        let content = sample_content();
        let s = content.to_string();
        assert!(s.starts_with("ELECTRONIC_PIGGYBANK-20-0123456789abcdef0123456789abcdef-"));
        assert_eq!(s.split('-').count(), 5);
        assert_eq!(s.matches(',').count(), 2);
        assert_eq!(parse_coin(&s).unwrap(), content);
    }

    #[test]
    fn accepted_strings_format_back_identically() {
        let good = sample_content().to_string();
        for amount in ["1", "20", "18446744073709551615"] {
            let s = replace_field(&good, 1, amount);
            assert_eq!(parse_coin(&s).unwrap().to_string(), s);
        }
    }

    fn assert_malformed(s: &str) {
        match parse_coin(s) {
            Err(EcashError::MalformedCoin(_)) => {}
            other => panic!("expected MalformedCoin for {:?}, got {:?}", s, other),
        }
    }

    #[test]
    fn wrong_marker_is_rejected() {
        let s = sample_content().to_string().replacen(BANK_MARKER, "COUNTERFEIT_BANK", 1);
        let err = parse_coin(&s).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed coin: Invalid identity string: COUNTERFEIT_BANK received, but ELECTRONIC_PIGGYBANK expected"
        );
    }

    fn replace_field(coin: &str, index: usize, value: &str) -> String {
        let mut fields: Vec<&str> = coin.split('-').collect();
        fields[index] = value;
        fields.join("-")
    }

    #[test]
    fn schema_violations_are_rejected() {
        let good = sample_content().to_string();
        let fields: Vec<&str> = good.split('-').collect();
        let with = |index: usize, value: &str| replace_field(&good, index, value);

        assert_malformed("");
        assert_malformed(&fields[..4].join("-"));
        assert_malformed(&format!("{}-extra", good));
        assert_malformed(&with(1, "0"));
        assert_malformed(&with(1, "-5"));
        assert_malformed(&with(1, "twenty"));
        assert_malformed(&with(1, "+20"));
        assert_malformed(&with(1, "+020"));
        assert_malformed(&with(1, "020"));
        assert_malformed(&with(1, "00"));
        assert_malformed(&with(1, " 20"));
        assert_malformed(&with(1, "18446744073709551616"));
        assert_malformed(&with(2, "0123456789ABCDEF0123456789ABCDEF"));
        assert_malformed(&with(2, "0123"));
        assert_malformed(&with(3, "abc"));
        assert_malformed(&with(3, ""));
        assert_malformed(&with(4, &share_hash(b"only one")));
    }
}
