use rand::{CryptoRng, RngCore};

use super::traits::{BitManipulation, Converter, Samplable, Zero};
use super::BigInt;

impl Samplable for BigInt {
    fn sample_below<R: RngCore + CryptoRng + ?Sized>(upper: &Self, rng: &mut R) -> Self {
        assert!(*upper > Self::zero(), "upper bound must be positive");

        let bits = upper.bit_length();
        loop {
            let n = Self::sample(bits, rng);
            if n < *upper {
                return n;
            }
        }
    }

    fn sample_range<R: RngCore + CryptoRng + ?Sized>(
        lower: &Self,
        upper: &Self,
        rng: &mut R,
    ) -> Self {
        assert!(upper > lower, "empty sampling range");
        lower + Self::sample_below(&(upper - lower), rng)
    }

    fn sample<R: RngCore + CryptoRng + ?Sized>(bit_size: usize, rng: &mut R) -> Self {
        if bit_size == 0 {
            return BigInt::zero();
        }
        let bytes = (bit_size - 1) / 8 + 1;
        let mut buf: Vec<u8> = vec![0; bytes];
        rng.fill_bytes(&mut buf);
        BigInt::from_bytes(&buf) >> (bytes * 8 - bit_size)
    }

    fn strict_sample<R: RngCore + CryptoRng + ?Sized>(bit_size: usize, rng: &mut R) -> Self {
        let mut n = Self::sample(bit_size, rng);
        if bit_size > 0 {
            n.set_bit(bit_size - 1, true);
        }
        n
    }
}
