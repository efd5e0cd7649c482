/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

pub mod arithmetic;
pub use crate::arithmetic::BigInt;

pub mod config;
pub mod cryptographic_primitives;
pub mod ecash;

#[cfg(test)]
mod test_utils;
