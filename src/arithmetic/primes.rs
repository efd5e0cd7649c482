use rand::{CryptoRng, RngCore};

use super::traits::*;
use super::BigInt;

const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Miller-Rabin rounds used when generating primes; error probability at most 4^-40.
pub const PRIME_GENERATION_ROUNDS: usize = 40;

impl Primes for BigInt {
    /// Trial division by the primes below 256, then `rounds` Miller-Rabin rounds with random bases.
    ///
    /// See Handbook of Applied Cryptography, p. 139, Algorithm 4.24.
    fn is_probable_prime<R: RngCore + CryptoRng + ?Sized>(&self, rounds: usize, rng: &mut R) -> bool {
        let two = BigInt::from(2u32);
        if *self < two {
            return false;
        }
        for p in SMALL_PRIMES.iter().copied().map(BigInt::from) {
            if *self == p {
                return true;
            }
            if (self % &p).is_zero() {
                return false;
            }
        }

        let one = BigInt::one();
        let n_minus_1 = self - &one;
        // n - 1 = q * 2^k with q odd
        let mut k = 0usize;
        while !n_minus_1.test_bit(k) {
            k += 1;
        }
        let q = &n_minus_1 >> k;

        'witness: for _ in 0..rounds {
            let base = BigInt::sample_range(&two, &n_minus_1, rng);
            let mut y = BigInt::mod_pow(&base, &q, self);
            if y == one || y == n_minus_1 {
                continue;
            }
            for _ in 1..k {
                y = BigInt::mod_mul(&y, &y, self);
                if y == n_minus_1 {
                    continue 'witness;
                }
                if y == one {
                    return false;
                }
            }
            return false;
        }
        true
    }

    fn generate_prime<R: RngCore + CryptoRng + ?Sized>(bit_size: usize, rng: &mut R) -> Self {
        assert!(bit_size >= 2, "primes need at least two bits");
        loop {
            let mut candidate = BigInt::strict_sample(bit_size, rng);
            // top two bits set so that the product of two such primes has exactly 2*bit_size bits
            if bit_size >= 3 {
                candidate.set_bit(bit_size - 2, true);
            }
            candidate.set_bit(0, true);
            if candidate.is_probable_prime(PRIME_GENERATION_ROUNDS, rng) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    #[test]
    fn recognises_known_primes_and_composites() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for p in [2u64, 3, 251, 257, 65537, 2_147_483_647, 18_446_744_073_709_551_557] {
            assert!(BigInt::from(p).is_probable_prime(20, &mut rng), "{} is prime", p);
        }
        // 561 and 41041 are Carmichael numbers
        for c in [0u64, 1, 4, 561, 41041, 65535, 4_294_967_297] {
            assert!(!BigInt::from(c).is_probable_prime(20, &mut rng), "{} is composite", c);
        }
    }

    #[test]
    fn generated_prime_has_requested_size() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let p = BigInt::generate_prime(128, &mut rng);
        assert_eq!(p.bit_length(), 128);
        assert!(p.test_bit(126));
        assert!(p.is_probable_prime(20, &mut rng));
    }
}
