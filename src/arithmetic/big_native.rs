use std::fmt;
use std::ops;
use std::sync::atomic;

use num_bigint::BigInt as BN;
use num_bigint::Sign;
use num_integer::Integer as NumInteger;
use num_traits::Signed;
use zeroize::Zeroize;

use super::errors::ParseBigIntError;
use super::traits::*;

/// Big integer
///
/// Wraps `num-bigint`, exposing only the narrow API the blind-signature and coin code need.
#[derive(PartialOrd, PartialEq, Ord, Eq, Clone, Hash)]
pub struct BigInt {
    num: BN,
}

impl BigInt {
    fn inner_ref(&self) -> &BN {
        &self.num
    }
    fn into_inner(self) -> BN {
        self.num
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        // num-bigint gives no mutable access to its limbs, so this only resets the value.
        self.num.set_zero();
        atomic::compiler_fence(atomic::Ordering::SeqCst);
    }
}

impl Converter for BigInt {
    fn to_bytes(&self) -> Vec<u8> {
        let (_sign, bytes) = self.num.to_bytes_be();
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        BN::from_bytes_be(Sign::Plus, bytes).wrap()
    }

    fn to_hex(&self) -> String {
        self.num.to_str_radix(16)
    }

    fn from_hex(n: &str) -> Result<Self, ParseBigIntError> {
        BN::parse_bytes(n.as_bytes(), 16)
            .map(Wrap::wrap)
            .ok_or_else(|| ParseBigIntError {
                input: n.to_owned(),
                radix: 16,
            })
    }
}

impl Modulo for BigInt {
    fn mod_pow(base: &Self, exponent: &Self, modulus: &Self) -> Self {
        base.num.modpow(&exponent.num, &modulus.num).wrap()
    }

    fn mod_mul(a: &Self, b: &Self, modulus: &Self) -> Self {
        (a.num.mod_floor(&modulus.num) * b.num.mod_floor(&modulus.num))
            .mod_floor(&modulus.num)
            .wrap()
    }

    fn mod_sub(a: &Self, b: &Self, modulus: &Self) -> Self {
        let a_m = a.num.mod_floor(&modulus.num);
        let b_m = b.num.mod_floor(&modulus.num);

        let sub_op = a_m - b_m + &modulus.num;
        sub_op.mod_floor(&modulus.num).wrap()
    }

    fn mod_inv(a: &Self, modulus: &Self) -> Option<Self> {
        let (gcd, x, _y) = egcd(&a.num.mod_floor(&modulus.num), &modulus.num);
        if gcd.is_one() {
            Some(x.mod_floor(&modulus.num).wrap())
        } else {
            None
        }
    }

    fn modulus(&self, modulus: &Self) -> Self {
        self.num.mod_floor(&modulus.num).wrap()
    }
}

/// Extended euclidean algorithm: returns `(g, x, y)` with `a*x + b*y = g`
fn egcd(a: &BN, b: &BN) -> (BN, BN, BN) {
    let mut old = (a.clone(), BN::one(), BN::zero());
    let mut now = (b.clone(), BN::zero(), BN::one());
    while !now.0.is_zero() {
        let q = &old.0 / &now.0;
        let next = (
            &old.0 - &q * &now.0,
            &old.1 - &q * &now.1,
            &old.2 - &q * &now.2,
        );
        old = std::mem::replace(&mut now, next);
    }
    if old.0.is_negative() {
        (-old.0, -old.1, -old.2)
    } else {
        old
    }
}

impl NumberTests for BigInt {
    fn is_even(n: &Self) -> bool {
        n.num.is_even()
    }

    fn is_negative(n: &Self) -> bool {
        n.num.is_negative()
    }
}

impl Integer for BigInt {
    fn gcd(&self, other: &Self) -> Self {
        self.num.gcd(&other.num).wrap()
    }

    fn is_odd(&self) -> bool {
        self.num.is_odd()
    }
}

impl BitManipulation for BigInt {
    fn set_bit(&mut self, bit: usize, bit_val: bool) {
        let mask = BN::one() << bit;
        if bit_val {
            self.num = &self.num | mask;
        } else if self.test_bit(bit) {
            self.num = &self.num ^ mask;
        }
    }

    fn test_bit(&self, bit: usize) -> bool {
        let mask = BN::one() << bit;
        !(&self.num & mask).is_zero()
    }

    fn bit_length(&self) -> usize {
        usize::try_from(self.num.bits()).unwrap_or(usize::MAX)
    }
}

crate::__bigint_impl_ops! {
    Add add,
    Sub sub,
    Mul mul,
    Rem rem,
    Shr shr usize,
}

impl Zero for BigInt {
    fn zero() -> Self {
        BN::zero().wrap()
    }
    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl One for BigInt {
    fn one() -> Self {
        BN::one().wrap()
    }
}

crate::__bigint_impl_from! { u32, u64 }

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.num, f)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt(0x{})", self.to_hex())
    }
}

/// Internal helper trait. Creates short-hand for wrapping num-bigint values into BigInt.
pub(super) trait Wrap {
    fn wrap(self) -> BigInt;
}
impl Wrap for BN {
    fn wrap(self) -> BigInt {
        BigInt { num: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_is_lowercase_and_unprefixed() {
        let n = BigInt::from_hex("DEADbeef").unwrap();
        assert_eq!(n, BigInt::from(0xdead_beef_u64));
        assert_eq!(n.to_hex(), "deadbeef");
        assert!(BigInt::from_hex("xyz").is_err());
    }

    #[test]
    fn bytes_are_big_endian_magnitude() {
        let n = BigInt::from_bytes(&[0x01, 0x00]);
        assert_eq!(n, BigInt::from(256u32));
        assert_eq!(n.to_bytes(), vec![0x01, 0x00]);
    }

    #[test]
    fn mod_inv_of_coprime_and_non_coprime() {
        let phi = BigInt::from(3120u32);
        let e = BigInt::from(17u32);
        let d = BigInt::mod_inv(&e, &phi).unwrap();
        assert_eq!(d, BigInt::from(2753u32));
        assert_eq!(BigInt::mod_mul(&e, &d, &phi), BigInt::one());
        assert_eq!(BigInt::mod_inv(&BigInt::from(6u32), &BigInt::from(9u32)), None);
    }

    #[test]
    fn textbook_rsa_round_trip() {
        let n = BigInt::from(3233u32);
        let m = BigInt::from(65u32);
        let c = BigInt::mod_pow(&m, &BigInt::from(17u32), &n);
        assert_eq!(c, BigInt::from(2790u32));
        assert_eq!(BigInt::mod_pow(&c, &BigInt::from(2753u32), &n), m);
    }

    #[test]
    fn mod_sub_wraps_around() {
        let m = BigInt::from(7u32);
        assert_eq!(
            BigInt::mod_sub(&BigInt::from(2u32), &BigInt::from(5u32), &m),
            BigInt::from(4u32)
        );
    }

    #[test]
    fn bit_manipulation() {
        let mut n = BigInt::zero();
        n.set_bit(10, true);
        assert!(n.test_bit(10));
        assert_eq!(n.bit_length(), 11);
        n.set_bit(10, false);
        assert!(n.is_zero());
    }

    #[test]
    fn zeroize_clears_value() {
        let mut n = BigInt::from(u64::MAX);
        n.zeroize();
        assert!(n.is_zero());
    }
}
