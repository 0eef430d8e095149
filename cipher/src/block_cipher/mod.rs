use crate::{Algorithm, CipherError};
use zeroize::Zeroize;

pub trait BlockEncrypt<const BLOCK_SIZE: usize> {
    fn encrypt_block(&self, plaintext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockDecrypt<const BLOCK_SIZE: usize> {
    fn decrypt_block(&self, ciphertext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockCipher<const N: usize>: BlockEncrypt<N> + BlockDecrypt<N> {
    const BLOCK_SIZE: usize = N;
}

impl<T, const N: usize> BlockCipher<N> for T where T: BlockDecrypt<N> + BlockEncrypt<N> {}

/// A block cipher that owns a key schedule derived from caller key bytes.
///
/// The schedule is never handed out; `zeroize` wipes it in place and
/// `is_zeroized` reports whether that has happened.
pub trait KeyedBlockCipher<const N: usize>: BlockCipher<N> + Zeroize + Sized {
    const ALGORITHM: Algorithm;
    const KEY_SIZE: usize;

    fn with_key(key: &[u8]) -> Result<Self, CipherError>;

    fn is_zeroized(&self) -> bool;
}

mod kuznyechik;
pub use kuznyechik::Kuznyechik;

mod magma;
pub use magma::Magma;
