use std::sync::OnceLock;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cryptographic_primitives::blind_signatures::rsa::RsaKeyPair;
use crate::ecash::bank::Bank;

/// Modulus size for test keys; small enough to generate quickly in debug builds.
pub const TEST_KEY_BITS: usize = 512;

/// One RSA key per test binary. Key generation dominates test time otherwise.
pub fn test_rsa_key() -> &'static RsaKeyPair {
    static KEY: OnceLock<RsaKeyPair> = OnceLock::new();
    KEY.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(0xB10C);
        RsaKeyPair::generate(TEST_KEY_BITS, &mut rng).expect("test key size is valid")
    })
}

pub fn test_bank() -> Bank {
    Bank::new(test_rsa_key().clone())
}

pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

#[macro_export]
macro_rules! test_for_all_hashes {
    (#[should_panic] $fn: ident) => {
        crate::test_for_all_hashes!([#[should_panic]] $fn);
    };
    ($fn: ident) => {
        crate::test_for_all_hashes!([] $fn);
    };
    ([$($attrs:tt)*] $fn: ident) => {
        crate::test_for_all!{[$($attrs)*] $fn =>
            sha256 = sha2::Sha256,
            sha512 = sha2::Sha512,
            sha3_256 = sha3::Sha3_256,
            sha3_512 = sha3::Sha3_512,
        }
    };
}

#[macro_export]
macro_rules! test_for_all {
    ([$($attrs:tt)*] $fn: ident =>) => {};
    ([$($attrs:tt)*] $fn: ident => $inst_name: ident = $inst:path, $($rest: tt)*) => {
        paste::paste!{
            #[test]
            $($attrs)*
            fn [<$fn _$inst_name>]() {
                $fn::<$inst>()
            }
        }
        crate::test_for_all!([$($attrs)*] $fn => $($rest)*);
    };
}
