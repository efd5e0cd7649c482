/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use rand::{CryptoRng, RngCore};

use super::errors::ParseBigIntError;

pub use num_traits::{One, Zero};

/// Byte and hex conversions. Bytes are big-endian magnitude, hex is lowercase without prefix.
pub trait Converter: Sized {
    fn to_bytes(&self) -> Vec<u8>;
    fn from_bytes(bytes: &[u8]) -> Self;
    fn to_hex(&self) -> String;
    fn from_hex(n: &str) -> Result<Self, ParseBigIntError>;
}

pub trait Modulo: Sized {
    fn mod_pow(base: &Self, exponent: &Self, modulus: &Self) -> Self;
    fn mod_mul(a: &Self, b: &Self, modulus: &Self) -> Self;
    fn mod_sub(a: &Self, b: &Self, modulus: &Self) -> Self;
    /// Returns `None` if `a` is not invertible modulo `modulus`
    fn mod_inv(a: &Self, modulus: &Self) -> Option<Self>;
    /// Reduces `self` into `[0, modulus)`
    fn modulus(&self, modulus: &Self) -> Self;
}

/// Uniform sampling from a caller-supplied random source.
pub trait Samplable: Sized {
    /// Panics unless `upper` is positive
    fn sample_below<R: RngCore + CryptoRng + ?Sized>(upper: &Self, rng: &mut R) -> Self;
    /// Panics unless `lower < upper`
    fn sample_range<R: RngCore + CryptoRng + ?Sized>(lower: &Self, upper: &Self, rng: &mut R)
        -> Self;
    fn sample<R: RngCore + CryptoRng + ?Sized>(bit_size: usize, rng: &mut R) -> Self;
    /// Samples a number of exactly `bit_size` bits
    fn strict_sample<R: RngCore + CryptoRng + ?Sized>(bit_size: usize, rng: &mut R) -> Self;
}

pub trait NumberTests {
    fn is_even(_: &Self) -> bool;
    fn is_negative(me: &Self) -> bool;
}

pub trait BitManipulation {
    fn set_bit(&mut self, bit: usize, bit_val: bool);
    fn test_bit(&self, bit: usize) -> bool;
    fn bit_length(&self) -> usize;
}

pub trait Integer: Sized {
    fn gcd(&self, other: &Self) -> Self;
    fn is_odd(&self) -> bool;
}

pub trait Primes: Sized {
    /// Probabilistic primality test with `rounds` Miller-Rabin rounds
    fn is_probable_prime<R: RngCore + CryptoRng + ?Sized>(&self, rounds: usize, rng: &mut R)
        -> bool;
    /// Samples a random prime of exactly `bit_size` bits
    fn generate_prime<R: RngCore + CryptoRng + ?Sized>(bit_size: usize, rng: &mut R) -> Self;
}
