/*
    This file is part of Blindcoin library
    Copyright 2018 by Kzen Networks
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

pub mod rsa;
