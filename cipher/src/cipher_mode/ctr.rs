//! ## The Counter Mode(CTR)
//!
//! 计数器是整个分组, 按大端整数递增, 模 $2^{8N}$ 回绕. 每个分组(包括最后不完整的分组)之后都递增一次. <br>
//! 对于给定密钥, 计数值不能重复, 否则 $C_1 \oplus C_2 = P_1 \oplus P_2$. <br>

use crate::BlockEncrypt;
use utils::Block;

// T = T + 1 mod 2^(8N)
pub(super) fn increment<const N: usize>(counter: &mut [u8; N]) {
    for b in counter.iter_mut().rev() {
        let (v, carry) = b.overflowing_add(1);
        *b = v;
        if !carry {
            break;
        }
    }
}

// 加密与解密相同
pub(super) fn apply<E: BlockEncrypt<N>, const N: usize>(
    cipher: &E,
    counter: &mut [u8; N],
    data: &mut [u8],
) {
    for chunk in data.chunks_mut(N) {
        let ks = cipher.encrypt_block(counter);
        Block::xor_in_place(chunk, &ks);
        increment(counter);
    }
}
