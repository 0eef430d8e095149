//! Magma 分组加密<br>
//! GOST R 34.12-2015, 64-bit block, 256-bit key<br>
//! [RFC 8891](https://www.rfc-editor.org/rfc/rfc8891)<br>
//!
//! $$
//! g[k](a) = (t(a \boxplus k)) \lll 11
//!
//! G[k](a_1, a_0) = (a_0, g[k](a_0) \oplus a_1)
//! $$
//!
//! 加密: $G^*[K_{32}]G[K_{31}]...G[K_1]$, 轮密钥顺序为 $K_1..K_8$ 三遍, 再 $K_8..K_1$.

use super::{BlockDecrypt, BlockEncrypt, KeyedBlockCipher};
use crate::{Algorithm, CipherError};
use utils::Block;
use zeroize::Zeroize;

#[derive(Clone)]
pub struct Magma {
    key: [u32; 8],
}

impl Magma {
    pub const KEY_SIZE: usize = 32;
    pub const BLOCK_SIZE: usize = 8;
    const ROUNDS: usize = 32;

    /// id-tc26-gost-28147-param-Z, PI[i] 作用于第i个半字节(从低位开始)
    const PI: [[u8; 16]; 8] = [
        [12, 4, 6, 2, 10, 5, 11, 9, 14, 8, 13, 7, 0, 3, 15, 1],
        [6, 8, 2, 3, 9, 10, 5, 12, 1, 14, 4, 7, 11, 13, 0, 15],
        [11, 3, 5, 8, 2, 15, 10, 13, 14, 1, 7, 4, 12, 9, 6, 0],
        [12, 8, 2, 1, 13, 4, 15, 6, 7, 0, 10, 5, 3, 14, 9, 11],
        [7, 15, 5, 10, 8, 1, 6, 13, 0, 9, 3, 14, 11, 4, 2, 12],
        [5, 13, 15, 6, 9, 2, 12, 10, 11, 7, 8, 1, 4, 3, 14, 0],
        [8, 14, 2, 5, 6, 9, 1, 12, 15, 4, 11, 0, 13, 10, 3, 7],
        [1, 7, 14, 13, 0, 5, 8, 3, 4, 15, 10, 6, 9, 12, 11, 2],
    ];

    pub fn new(key: [u8; Self::KEY_SIZE]) -> Self {
        let mut key = key;
        let mut words = [0u32; 8];
        for (w, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
            *w = u32::from_be_bytes(Block::to_arr_uncheck(chunk));
        }
        key.zeroize();

        Self { key: words }
    }

    // 第i轮(从0开始)加密使用的轮密钥
    fn round_key(&self, i: usize) -> u32 {
        if i < 24 {
            self.key[i & 7]
        } else {
            self.key[7 - (i & 7)]
        }
    }

    fn t(a: u32) -> u32 {
        (0..8).fold(0u32, |r, i| {
            let nibble = ((a >> (4 * i)) & 0xf) as usize;
            r | ((Self::PI[i][nibble] as u32) << (4 * i))
        })
    }

    fn g(k: u32, a: u32) -> u32 {
        Self::t(a.wrapping_add(k)).rotate_left(11)
    }

    fn crypt<F: Fn(usize) -> u32>(data: &[u8; 8], round_key: F) -> [u8; 8] {
        let (mut a1, mut a0) = (
            u32::from_be_bytes(Block::to_arr_uncheck(&data[..4])),
            u32::from_be_bytes(Block::to_arr_uncheck(&data[4..])),
        );

        for i in 0..(Self::ROUNDS - 1) {
            (a1, a0) = (a0, Self::g(round_key(i), a0) ^ a1);
        }
        a1 ^= Self::g(round_key(Self::ROUNDS - 1), a0);

        let mut block = [0u8; 8];
        block[..4].copy_from_slice(&a1.to_be_bytes());
        block[4..].copy_from_slice(&a0.to_be_bytes());
        block
    }
}

impl BlockEncrypt<8> for Magma {
    fn encrypt_block(&self, plaintext: &[u8; 8]) -> [u8; 8] {
        Self::crypt(plaintext, |i| self.round_key(i))
    }
}

impl BlockDecrypt<8> for Magma {
    fn decrypt_block(&self, ciphertext: &[u8; 8]) -> [u8; 8] {
        Self::crypt(ciphertext, |i| self.round_key(Self::ROUNDS - 1 - i))
    }
}

impl Zeroize for Magma {
    fn zeroize(&mut self) {
        self.key.zeroize();
    }
}

impl Drop for Magma {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl KeyedBlockCipher<8> for Magma {
    const ALGORITHM: Algorithm = Algorithm::Magma;
    const KEY_SIZE: usize = Magma::KEY_SIZE;

    fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        match Block::to_arr(key) {
            Some(key) => Ok(Self::new(key)),
            None => Err(CipherError::InvalidKeySize {
                target: Self::KEY_SIZE,
                real: key.len(),
            }),
        }
    }

    fn is_zeroized(&self) -> bool {
        self.key.iter().all(|&k| k == 0)
    }
}
