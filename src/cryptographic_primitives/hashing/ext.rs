use digest::Digest;

use crate::arithmetic::*;

/// [Digest] extension allowing to hash bigints and byte strings into bigints or hex strings
///
/// Can be used with any hashing algorithm that implements `Digest` traits (e.g. [Sha256](sha2::Sha256),
/// [Sha512](sha2::Sha512), `Sha3_256`, etc.)
///
/// ## Example
///
/// ```rust
/// use sha2::Sha256;
/// use blindcoin::arithmetic::*;
/// use blindcoin::cryptographic_primitives::hashing::{Digest, DigestExt};
///
/// let hash = Sha256::new()
///     .chain_bytes(b"abc")
///     .result_hex();
///
/// assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
/// ```
pub trait DigestExt {
    fn input_bigint(&mut self, n: &BigInt);
    fn input_bytes(&mut self, bytes: &[u8]);

    fn chain_bigint(mut self, n: &BigInt) -> Self
    where
        Self: Sized,
    {
        self.input_bigint(n);
        self
    }
    fn chain_bytes(mut self, bytes: &[u8]) -> Self
    where
        Self: Sized,
    {
        self.input_bytes(bytes);
        self
    }

    fn result_bigint(self) -> BigInt;
    /// Lowercase hex of the digest, zero-padded to the full output size
    fn result_hex(self) -> String;

    fn digest_bigint(bytes: &[u8]) -> BigInt;
    fn digest_hex(bytes: &[u8]) -> String;
}

impl<D> DigestExt for D
where
    D: Digest,
{
    fn input_bigint(&mut self, n: &BigInt) {
        self.update(n.to_bytes())
    }

    fn input_bytes(&mut self, bytes: &[u8]) {
        self.update(bytes)
    }

    fn result_bigint(self) -> BigInt {
        let result = self.finalize();
        BigInt::from_bytes(&result)
    }

    fn result_hex(self) -> String {
        hex::encode(self.finalize())
    }

    fn digest_bigint(bytes: &[u8]) -> BigInt {
        Self::new().chain_bytes(bytes).result_bigint()
    }

    fn digest_hex(bytes: &[u8]) -> String {
        Self::new().chain_bytes(bytes).result_hex()
    }
}
