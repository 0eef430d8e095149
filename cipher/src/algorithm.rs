use crate::CipherError;
use std::fmt::Display;
use std::str::FromStr;
use xrand::rngs::OsRng;
use xrand::RngCore;

/// The block cipher primitives a session can be built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// GOST R 34.12-2015, 128-bit block
    Kuznyechik,
    /// GOST R 34.12-2015, 64-bit block
    Magma,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Kuznyechik, Algorithm::Magma];

    /// Exact, case-sensitive match against the algorithm names.
    pub fn resolve(name: &str) -> Result<Self, CipherError> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| CipherError::UnsupportedAlgorithm(name.to_string()))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Kuznyechik => "kuznyechik",
            Algorithm::Magma => "magma",
        }
    }

    pub const fn key_size(self) -> usize {
        match self {
            Algorithm::Kuznyechik => 32,
            Algorithm::Magma => 32,
        }
    }

    pub const fn block_size(self) -> usize {
        match self {
            Algorithm::Kuznyechik => 16,
            Algorithm::Magma => 8,
        }
    }

    /// A fresh block-sized IV from the operating system RNG.
    pub fn random_iv(self) -> Vec<u8> {
        let mut iv = vec![0u8; self.block_size()];
        OsRng.fill_bytes(iv.as_mut_slice());
        iv
    }
}

impl FromStr for Algorithm {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
