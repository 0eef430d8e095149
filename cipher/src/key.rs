use crate::{Algorithm, CipherError};
use std::fmt::{Debug, Formatter};
use utils::Block;
use zeroize::Zeroize;

/// Secret key bytes validated against one algorithm's key length.
///
/// The bytes live in a [`Block`], so they are wiped when the material is
/// dropped or explicitly zeroized.
pub struct KeyMaterial {
    algorithm: Algorithm,
    data: Block,
}

impl KeyMaterial {
    pub fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != algorithm.key_size() {
            return Err(CipherError::InvalidKeySize {
                target: algorithm.key_size(),
                real: key.len(),
            });
        }

        Ok(Self {
            algorithm,
            data: Block::from(key),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }
}

impl Zeroize for KeyMaterial {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl Debug for KeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &self.algorithm)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}
