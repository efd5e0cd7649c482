/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

mod big_native;
mod errors;
mod macros;
mod primes;
mod samplable;
mod serde_support;
pub mod traits;

pub use big_native::BigInt;
pub use errors::ParseBigIntError;
pub use primes::PRIME_GENERATION_ROUNDS;
pub use traits::*;
