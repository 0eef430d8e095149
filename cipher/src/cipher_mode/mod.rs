//! # Block Cipher Modes of Operation
//!
//! [GOST R 34.13-2015](https://www.rfc-editor.org/rfc/rfc9058)<br>
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)<br>
//!
//! 所有模式都使用一个分组长度的初始向量IV, 由它初始化链接状态(chaining state). <br>
//! 数据原地(in-place)逐块处理, 输入和输出可以是同一块内存. <br>
//! <br>
//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//!
//! P_j = Decrypt(C_j), j = 1...n
//! $$
//!
//! 无状态, 输入长度必须是分组长度的整数倍. <br>
//! <br>
//! ## The Cipher Block Chaining Mode(CBC)
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//!
//! P_1 = Decrypt(C_1) \xor IV; P_j = Decrypt(C_j) \xor C_{j-1}, j = 2...n
//! $$
//!
//! 输入长度必须是分组长度的整数倍. <br>
//! <br>
//! ## The Counter Mode(CTR)
//!
//! $$
//! T_1 = IV; T_j = T_{j-1} + 1 \mod 2^b; O_j = Encrypt(T_j); C_j = P_j \xor O_j, j = 1...n-1; C'_n = P'_n \xor MSB_u(O_n);
//! $$
//!
//! 加密和解密是同一个运算. <br>
//! <br>
//! ## The Output Feedback Mode(OFB)
//!
//! $$
//! I_1 = IV; I_j = O_{j-1}, j = 2...n; O_j = Encrypt(I_j), C_j = P_j \xor O_j, j = 1...n-1; C'_n = P'_n \xor MSB_u(O_n);
//! $$
//!
//! ## The Cipher Feedback Mode(CFB)
//!
//! 反馈整个分组($s = b$). <br>
//!
//! $$
//! I_1 = IV; I_j = C_{j-1}, j = 2...n; O_j = Encrypt(I_j); C_j = P_j \xor O_j, j = 1...n-1; C'_n = P'_n \xor MSB_u(O_n);
//!
//! I_1 = IV; I_j = C_{j-1}, j = 2...n; O_j = Encrypt(I_j); P_j = C_j \xor O_j, j = 1...n-1; P'_n = C'_n \xor MSB_u(O_n);
//! $$
//!
//! CTR, OFB, CFB 不要求对齐, 输出长度等于输入长度.
//!

use crate::{BlockCipher, BlockEncrypt, CipherError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use zeroize::Zeroize;

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod ofb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mode {
    ECB,
    CBC,
    CTR,
    OFB,
    CFB,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::ECB, Mode::CBC, Mode::CTR, Mode::OFB, Mode::CFB];

    /// ECB and CBC only accept whole blocks.
    pub const fn is_block_aligned(self) -> bool {
        matches!(self, Mode::ECB | Mode::CBC)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        })
    }
}

/// One mode of operation over an `N`-byte block cipher.
///
/// `state` is the chaining block: the previous ciphertext (CBC, CFB), the
/// previous keystream block (OFB) or the counter (CTR). It is seeded from the
/// IV and wiped on drop.
pub struct ModeEngine<const N: usize> {
    mode: Mode,
    state: [u8; N],
}

impl<const N: usize> ModeEngine<N> {
    pub fn new(mode: Mode, iv: &[u8]) -> Result<Self, CipherError> {
        let state: [u8; N] = iv.try_into().map_err(|_| CipherError::InvalidIvSize {
            target: N,
            real: iv.len(),
        })?;

        Ok(Self { mode, state })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn check_data_len(&self, len: usize) -> Result<(), CipherError> {
        if self.mode.is_block_aligned() && len % N != 0 {
            Err(CipherError::InvalidInputLength(format!(
                "{} requires a multiple of the {N} bytes block size, got {len} bytes",
                self.mode
            )))
        } else {
            Ok(())
        }
    }

    pub fn encrypt<E: BlockEncrypt<N>>(
        &mut self,
        cipher: &E,
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        self.check_data_len(data.len())?;

        match self.mode {
            Mode::ECB => ecb::encrypt(cipher, data),
            Mode::CBC => cbc::encrypt(cipher, &mut self.state, data),
            Mode::CTR => ctr::apply(cipher, &mut self.state, data),
            Mode::OFB => ofb::apply(cipher, &mut self.state, data),
            Mode::CFB => cfb::encrypt(cipher, &mut self.state, data),
        }

        Ok(())
    }

    pub fn decrypt<E: BlockCipher<N>>(
        &mut self,
        cipher: &E,
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        self.check_data_len(data.len())?;

        match self.mode {
            Mode::ECB => ecb::decrypt(cipher, data),
            Mode::CBC => cbc::decrypt(cipher, &mut self.state, data),
            Mode::CTR => ctr::apply(cipher, &mut self.state, data),
            Mode::OFB => ofb::apply(cipher, &mut self.state, data),
            Mode::CFB => cfb::decrypt(cipher, &mut self.state, data),
        }

        Ok(())
    }

    pub fn run<E: BlockCipher<N>>(
        &mut self,
        direction: Direction,
        cipher: &E,
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        match direction {
            Direction::Encrypt => self.encrypt(cipher, data),
            Direction::Decrypt => self.decrypt(cipher, data),
        }
    }

    pub fn is_zeroized(&self) -> bool {
        self.state.iter().all(|&b| b == 0)
    }
}

impl<const N: usize> Zeroize for ModeEngine<N> {
    fn zeroize(&mut self) {
        self.state.zeroize();
    }
}

impl<const N: usize> Drop for ModeEngine<N> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Mode, ModeEngine};
    use crate::block_cipher::{Kuznyechik, Magma};
    use crate::{CipherError, KeyedBlockCipher};
    use xrand::rngs::OsRng;
    use xrand::RngCore;

    fn random_bytes(len: usize) -> Vec<u8> {
        let mut v = vec![0u8; len];
        OsRng.fill_bytes(v.as_mut_slice());
        v
    }

    fn roundtrip<E: KeyedBlockCipher<N>, const N: usize>() {
        let cipher = E::with_key(&random_bytes(E::KEY_SIZE)).unwrap();
        let iv = random_bytes(N);

        for mode in Mode::ALL {
            for blocks in [0usize, 1, 2, 7] {
                for extra in [0usize, 1, N - 1] {
                    if mode.is_block_aligned() && extra != 0 {
                        continue;
                    }
                    let pt = random_bytes(blocks * N + extra);
                    let mut data = pt.clone();

                    ModeEngine::<N>::new(mode, &iv)
                        .unwrap()
                        .run(Direction::Encrypt, &cipher, &mut data)
                        .unwrap();
                    assert_eq!(data.len(), pt.len(), "{mode} length changed");
                    if pt.len() >= N {
                        assert_ne!(data, pt, "{mode} left data untouched");
                    }

                    ModeEngine::<N>::new(mode, &iv)
                        .unwrap()
                        .run(Direction::Decrypt, &cipher, &mut data)
                        .unwrap();
                    assert_eq!(data, pt, "{mode} roundtrip failed, len {}", pt.len());
                }
            }
        }
    }

    #[test]
    fn mode_roundtrip() {
        roundtrip::<Kuznyechik, 16>();
        roundtrip::<Magma, 8>();
    }

    #[test]
    fn mode_alignment() {
        let cipher = Magma::with_key(&[1u8; 32]).unwrap();
        for mode in Mode::ALL {
            let mut engine = ModeEngine::<8>::new(mode, &[0u8; 8]).unwrap();
            let mut data = [0u8; 13];
            let res = engine.encrypt(&cipher, &mut data);
            if mode.is_block_aligned() {
                assert!(
                    matches!(res, Err(CipherError::InvalidInputLength(_))),
                    "{mode} must reject 13 bytes"
                );
                assert_eq!(data, [0u8; 13], "{mode} touched rejected data");
            } else {
                assert!(res.is_ok(), "{mode} must accept 13 bytes");
            }
        }
    }

    #[test]
    fn mode_iv_size() {
        for mode in Mode::ALL {
            assert_eq!(
                ModeEngine::<16>::new(mode, &[0u8; 8]).err(),
                Some(CipherError::InvalidIvSize {
                    target: 16,
                    real: 8
                })
            );
        }
    }

    #[test]
    fn cbc_error_locality() {
        let cipher = Kuznyechik::with_key(&random_bytes(32)).unwrap();
        let (iv, pt) = (random_bytes(16), random_bytes(16 * 6));

        let mut ct = pt.clone();
        ModeEngine::<16>::new(Mode::CBC, &iv)
            .unwrap()
            .encrypt(&cipher, &mut ct)
            .unwrap();

        for i in 0..6 {
            let mut data = ct.clone();
            data[i * 16 + 3] ^= 0x10;
            ModeEngine::<16>::new(Mode::CBC, &iv)
                .unwrap()
                .decrypt(&cipher, &mut data)
                .unwrap();

            for (j, (a, b)) in data.chunks(16).zip(pt.chunks(16)).enumerate() {
                if j == i || j == i + 1 {
                    assert_ne!(a, b, "block {j} should be damaged by flip in {i}");
                } else {
                    assert_eq!(a, b, "block {j} should survive flip in {i}");
                }
            }
        }
    }

    #[test]
    fn ctr_keystream_reuse() {
        let cipher = Magma::with_key(&random_bytes(32)).unwrap();
        let iv = random_bytes(8);
        let (p1, p2) = (random_bytes(45), random_bytes(45));

        let (mut c1, mut c2) = (p1.clone(), p2.clone());
        ModeEngine::<8>::new(Mode::CTR, &iv)
            .unwrap()
            .encrypt(&cipher, &mut c1)
            .unwrap();
        ModeEngine::<8>::new(Mode::CTR, &iv)
            .unwrap()
            .encrypt(&cipher, &mut c2)
            .unwrap();

        let cx = c1.iter().zip(c2.iter()).map(|(a, b)| a ^ b).collect::<Vec<_>>();
        let px = p1.iter().zip(p2.iter()).map(|(a, b)| a ^ b).collect::<Vec<_>>();
        assert_eq!(cx, px);
    }

    #[test]
    fn engine_state_zeroize() {
        use zeroize::Zeroize;
        let cipher = Kuznyechik::with_key(&[3u8; 32]).unwrap();
        let mut engine = ModeEngine::<16>::new(Mode::OFB, &[0x5au8; 16]).unwrap();
        let mut data = [0u8; 20];
        engine.encrypt(&cipher, &mut data).unwrap();
        assert!(!engine.is_zeroized());
        engine.zeroize();
        assert!(engine.is_zeroized());
    }
}
