//! ## The Cipher Feedback Mode(CFB)
//!
//! 反馈的总是密文: 加密时是刚输出的块, 解密时是刚读入的块. <br>

use crate::BlockEncrypt;
use utils::Block;

pub(super) fn encrypt<E: BlockEncrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    data: &mut [u8],
) {
    for chunk in data.chunks_mut(N) {
        let ks = cipher.encrypt_block(iv);
        Block::xor_in_place(chunk, &ks);
        iv[..chunk.len()].copy_from_slice(chunk);
    }
}

pub(super) fn decrypt<E: BlockEncrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    data: &mut [u8],
) {
    for chunk in data.chunks_mut(N) {
        let ks = cipher.encrypt_block(iv);
        iv[..chunk.len()].copy_from_slice(chunk);
        Block::xor_in_place(chunk, &ks);
    }
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::{Kuznyechik, Magma};
    use crate::cipher_mode::{Mode, ModeEngine};
    use crate::KeyedBlockCipher;

    #[test]
    fn cfb_kuznyechik() {
        let key =
            hex::decode("8899aabbccddeeff0011223344556677fedcba98765432100123456789abcdef").unwrap();
        let iv = hex::decode("1234567890abcef0a1b2c3d4e5f00112").unwrap();
        let pt = hex::decode("1122334455667700ffeeddccbbaa998800112233445566778899aabbcceeff0a112233445566778899aabbcceeff0a002233445566778899aabbcceeff0a0011").unwrap();
        let ct = "81800a59b1842b24ff1f795e897abd9568c1b99c4df59cc7951e3739b5b3cdbf073f4dd2d6deb3cfb026545f7af1d8e8e1c852e9a8567162dbb5da7f66dea926";
        let cipher = Kuznyechik::with_key(&key).unwrap();

        for len in [pt.len(), 37] {
            let mut buf = pt[..len].to_vec();
            ModeEngine::<16>::new(Mode::CFB, &iv)
                .unwrap()
                .encrypt(&cipher, &mut buf)
                .unwrap();
            assert_eq!(hex::encode(&buf), ct[..len * 2], "len {len} encrypt failed");

            ModeEngine::<16>::new(Mode::CFB, &iv)
                .unwrap()
                .decrypt(&cipher, &mut buf)
                .unwrap();
            assert_eq!(buf, pt[..len], "len {len} decrypt failed");
        }
    }

    #[test]
    fn cfb_magma() {
        let key =
            hex::decode("ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();
        let iv = hex::decode("1234567890abcdef").unwrap();
        let pt = hex::decode("92def06b3c130a59db54c704f8189d204a98fb2e67a8024c8912409b17b57e41").unwrap();
        let ct = hex::decode("db37e0e266903c83b571ee29cca54ce791fabcb3abbe2fe3ff5d972d770f6ae9").unwrap();
        let cipher = Magma::with_key(&key).unwrap();

        let mut buf = ct.clone();
        ModeEngine::<8>::new(Mode::CFB, &iv)
            .unwrap()
            .decrypt(&cipher, &mut buf)
            .unwrap();
        assert_eq!(buf, pt);
    }
}
