//! ## The Output Feedback Mode(OFB)
//!
//! 每次加解密都依赖于前一次的输出, 因此加解密都是无法并行的. 加密和解密是同一个运算. <br>

use crate::BlockEncrypt;
use utils::Block;

pub(super) fn apply<E: BlockEncrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    data: &mut [u8],
) {
    for chunk in data.chunks_mut(N) {
        *iv = cipher.encrypt_block(iv);
        Block::xor_in_place(chunk, iv);
    }
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::{Kuznyechik, Magma};
    use crate::cipher_mode::{Mode, ModeEngine};
    use crate::KeyedBlockCipher;

    #[test]
    fn ofb_kuznyechik() {
        let key =
            hex::decode("8899aabbccddeeff0011223344556677fedcba98765432100123456789abcdef").unwrap();
        let iv = hex::decode("1234567890abcef0a1b2c3d4e5f00112").unwrap();
        let pt = hex::decode("1122334455667700ffeeddccbbaa998800112233445566778899aabbcceeff0a112233445566778899aabbcceeff0a002233445566778899aabbcceeff0a0011").unwrap();
        let ct = "81800a59b1842b24ff1f795e897abd95779146db2d93a94ed93cf68b32397f19e93c9e57441d870545f24036a58ceea3cf3f0061d56423545b960d864cc868da";
        let cipher = Kuznyechik::with_key(&key).unwrap();

        // 整块与不完整的最后一块
        for len in [pt.len(), 37] {
            let mut buf = pt[..len].to_vec();
            ModeEngine::<16>::new(Mode::OFB, &iv)
                .unwrap()
                .encrypt(&cipher, &mut buf)
                .unwrap();
            assert_eq!(hex::encode(&buf), ct[..len * 2], "len {len} encrypt failed");

            ModeEngine::<16>::new(Mode::OFB, &iv)
                .unwrap()
                .decrypt(&cipher, &mut buf)
                .unwrap();
            assert_eq!(buf, pt[..len], "len {len} decrypt failed");
        }
    }

    #[test]
    fn ofb_magma() {
        let key =
            hex::decode("ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();
        let iv = hex::decode("1234567890abcdef").unwrap();
        let pt = hex::decode("92def06b3c130a59db54c704f8189d204a98fb2e67a8024c8912409b17b57e41").unwrap();
        let cipher = Magma::with_key(&key).unwrap();

        let mut buf = pt.clone();
        ModeEngine::<8>::new(Mode::OFB, &iv)
            .unwrap()
            .encrypt(&cipher, &mut buf)
            .unwrap();
        assert_eq!(
            hex::encode(&buf),
            "db37e0e266903c8331340c48dcbead127193f8746455692c527d38b4e3feedd2"
        );
    }
}
