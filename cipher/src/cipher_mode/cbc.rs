//! ## The Cipher Block Chaining Mode(CBC)
//!
//! 在CBC模式中, 加密每个明文块依赖前一个密文输出, 故Encrypt无法并行. 但Decrypt是可以并行的. <br>
//! 单比特密文错误只影响当前块和下一块的明文. <br>

use crate::{BlockDecrypt, BlockEncrypt};
use utils::Block;

fn encrypt_inner<E: BlockEncrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    block: &[u8],
) -> [u8; N] {
    Block::xor_in_place(iv, block);
    let d = cipher.encrypt_block(&*iv);
    iv.copy_from_slice(d.as_slice());
    d
}

fn decrypt_inner<E: BlockDecrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    block: &[u8; N],
) -> [u8; N] {
    let mut d = cipher.decrypt_block(block);
    Block::xor_in_place(&mut d, iv);
    iv.copy_from_slice(block.as_slice());
    d
}

pub(super) fn encrypt<E: BlockEncrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    data: &mut [u8],
) {
    for chunk in data.chunks_exact_mut(N) {
        let d = encrypt_inner(cipher, iv, chunk);
        chunk.copy_from_slice(d.as_slice());
    }
}

pub(super) fn decrypt<E: BlockDecrypt<N>, const N: usize>(
    cipher: &E,
    iv: &mut [u8; N],
    data: &mut [u8],
) {
    for chunk in data.chunks_exact_mut(N) {
        // 先保存密文块, 原地写入会覆盖它
        let block = Block::to_arr_uncheck(chunk);
        let d = decrypt_inner(cipher, iv, &block);
        chunk.copy_from_slice(d.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::{Kuznyechik, Magma};
    use crate::cipher_mode::{Mode, ModeEngine};
    use crate::KeyedBlockCipher;

    const KUZNYECHIK_KEY: &str = "8899aabbccddeeff0011223344556677fedcba98765432100123456789abcdef";
    const MAGMA_KEY: &str = "ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";

    #[test]
    fn cbc_kuznyechik() {
        let cipher = Kuznyechik::with_key(&hex::decode(KUZNYECHIK_KEY).unwrap()).unwrap();
        let iv = hex::decode("1234567890abcef0a1b2c3d4e5f00112").unwrap();
        let pt = hex::decode("1122334455667700ffeeddccbbaa998800112233445566778899aabbcceeff0a112233445566778899aabbcceeff0a002233445566778899aabbcceeff0a0011").unwrap();
        // 第一块与 GOST R 34.13-2015 A.1.4 一致
        let ct = hex::decode("689972d4a085fa4d90e52e3d6d7dcc27abf170b2b226c3010ccfa136d659cdaaca719272ab1d438e15507d521ecd5522e01108ff8d9d3a6d8ca2a533fa614e71").unwrap();

        let mut buf = pt.clone();
        ModeEngine::<16>::new(Mode::CBC, &iv)
            .unwrap()
            .encrypt(&cipher, &mut buf)
            .unwrap();
        assert_eq!(buf, ct);

        ModeEngine::<16>::new(Mode::CBC, &iv)
            .unwrap()
            .decrypt(&cipher, &mut buf)
            .unwrap();
        assert_eq!(buf, pt);
    }

    #[test]
    fn cbc_magma() {
        let cipher = Magma::with_key(&hex::decode(MAGMA_KEY).unwrap()).unwrap();
        let iv = hex::decode("1234567890abcdef").unwrap();
        let pt = hex::decode("92def06b3c130a59db54c704f8189d204a98fb2e67a8024c8912409b17b57e41").unwrap();
        let ct = hex::decode("96d1b05eea683919f396b78c1d47bb616183e2cca976a4babe9ce87d6fa73cf2").unwrap();

        let mut buf = pt.clone();
        ModeEngine::<8>::new(Mode::CBC, &iv)
            .unwrap()
            .encrypt(&cipher, &mut buf)
            .unwrap();
        assert_eq!(buf, ct);

        ModeEngine::<8>::new(Mode::CBC, &iv)
            .unwrap()
            .decrypt(&cipher, &mut buf)
            .unwrap();
        assert_eq!(buf, pt);
    }
}
