//! ## The Electronic Codebook Mode(ECB)
//!
//! 给定的密钥, 每个明文块和密文块一一对应(如果不期待使用这一特性, 不应该使用ECB模式). <br>

use crate::{BlockDecrypt, BlockEncrypt};
use utils::Block;

// 调用者保证`data.len()`是`N`的整数倍
pub(super) fn encrypt<E: BlockEncrypt<N>, const N: usize>(cipher: &E, data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(N) {
        let d = cipher.encrypt_block(&Block::to_arr_uncheck(chunk));
        chunk.copy_from_slice(d.as_slice());
    }
}

pub(super) fn decrypt<E: BlockDecrypt<N>, const N: usize>(cipher: &E, data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(N) {
        let d = cipher.decrypt_block(&Block::to_arr_uncheck(chunk));
        chunk.copy_from_slice(d.as_slice());
    }
}
