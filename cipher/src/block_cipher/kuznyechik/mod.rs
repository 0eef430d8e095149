//! Kuznyechik 分组加密<br>
//! GOST R 34.12-2015, 128-bit block, 256-bit key<br>
//! [RFC 7801](https://www.rfc-editor.org/rfc/rfc7801)<br>
//!
//! $$
//! E_K(a) = X[K_{10}]LSX[K_9]...LSX[K_1](a)
//!
//! D_K(a) = X[K_1]S^{-1}L^{-1}...X[K_9]S^{-1}L^{-1}X[K_{10}](a)
//! $$
//!
//! 字节串按标准的顺序存放: 第0个字节是 $a_{15}$.

use super::{BlockDecrypt, BlockEncrypt, KeyedBlockCipher};
use crate::{Algorithm, CipherError};
use utils::Block;
use zeroize::Zeroize;

mod const_;


#[derive(Clone)]
pub struct Kuznyechik {
    round_keys: [[u8; 16]; 10],
}

impl Kuznyechik {
    pub const KEY_SIZE: usize = 32;
    pub const BLOCK_SIZE: usize = 16;
    // 轮密钥个数
    const ROUNDS: usize = 10;

    pub fn new(key: [u8; Self::KEY_SIZE]) -> Self {
        let mut key = key;
        let mut round_keys = [[0u8; 16]; Self::ROUNDS];
        let (mut k1, mut k2) = (
            Block::to_arr_uncheck::<16>(&key[..16]),
            Block::to_arr_uncheck::<16>(&key[16..]),
        );
        round_keys[0] = k1;
        round_keys[1] = k2;

        // F[C](a1, a0) = (LSX[C](a1) ^ a0, a1), 每8次迭代输出一对轮密钥
        for i in 0..4 {
            for j in 0..8 {
                let c = Self::round_constant((8 * i + j + 1) as u8);
                let mut t = k1;
                Self::x(&mut t, &c);
                Self::s(&mut t);
                Self::l(&mut t);
                Self::x(&mut t, &k2);
                k2 = k1;
                k1 = t;
                t.zeroize();
            }
            round_keys[2 * i + 2] = k1;
            round_keys[2 * i + 3] = k2;
        }

        k1.zeroize();
        k2.zeroize();
        key.zeroize();

        Self { round_keys }
    }

    // C_i = L(Vec128(i))
    fn round_constant(i: u8) -> [u8; 16] {
        let mut c = [0u8; 16];
        c[15] = i;
        Self::l(&mut c);
        c
    }

    fn x(block: &mut [u8; 16], key: &[u8; 16]) {
        Block::xor_in_place(block, key);
    }

    fn s(block: &mut [u8; 16]) {
        block.iter_mut().for_each(|b| *b = Self::PI[*b as usize]);
    }

    fn s_inv(block: &mut [u8; 16]) {
        block.iter_mut().for_each(|b| *b = Self::PI_INV[*b as usize]);
    }

    // l(a_15, ..., a_0)
    fn l_func(block: &[u8; 16]) -> u8 {
        block
            .iter()
            .zip(Self::L_TABLE.iter())
            .fold(0, |acc, (&b, t)| acc ^ t[b as usize])
    }

    // R(a) = l(a) || a_15 || ... || a_1
    fn r(block: &mut [u8; 16]) {
        let x = Self::l_func(block);
        block.copy_within(0..15, 1);
        block[0] = x;
    }

    // R^{-1}(a) = a_14 || ... || a_0 || l(a_14, ..., a_0, a_15)
    fn r_inv(block: &mut [u8; 16]) {
        block.rotate_left(1);
        let x = Self::l_func(block);
        block[15] = x;
    }

    fn l(block: &mut [u8; 16]) {
        (0..16).for_each(|_| Self::r(block));
    }

    fn l_inv(block: &mut [u8; 16]) {
        (0..16).for_each(|_| Self::r_inv(block));
    }

    pub(super) fn encrypt_block_inner(&self, data: &[u8; 16]) -> [u8; 16] {
        let mut block = *data;
        let (rounds, last) = (
            &self.round_keys[..Self::ROUNDS - 1],
            &self.round_keys[Self::ROUNDS - 1],
        );
        for k in rounds {
            Self::x(&mut block, k);
            Self::s(&mut block);
            Self::l(&mut block);
        }
        Self::x(&mut block, last);
        block
    }

    pub(super) fn decrypt_block_inner(&self, data: &[u8; 16]) -> [u8; 16] {
        let mut block = *data;
        let (rounds, last) = (
            &self.round_keys[..Self::ROUNDS - 1],
            &self.round_keys[Self::ROUNDS - 1],
        );
        Self::x(&mut block, last);
        for k in rounds.iter().rev() {
            Self::l_inv(&mut block);
            Self::s_inv(&mut block);
            Self::x(&mut block, k);
        }
        block
    }
}

impl BlockEncrypt<16> for Kuznyechik {
    fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
        self.encrypt_block_inner(plaintext)
    }
}

impl BlockDecrypt<16> for Kuznyechik {
    fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
        self.decrypt_block_inner(ciphertext)
    }
}

impl Zeroize for Kuznyechik {
    fn zeroize(&mut self) {
        self.round_keys.zeroize();
    }
}

impl Drop for Kuznyechik {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl KeyedBlockCipher<16> for Kuznyechik {
    const ALGORITHM: Algorithm = Algorithm::Kuznyechik;
    const KEY_SIZE: usize = Kuznyechik::KEY_SIZE;

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
        self.round_keys.iter().flatten().all(|&b| b == 0)
    }
}
