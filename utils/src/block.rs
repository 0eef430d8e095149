use std::fmt::{Debug, Formatter};
use std::ops::{Deref, DerefMut};
use zeroize::Zeroize;

/// Owned byte buffer that is overwritten with zeros when dropped.
///
/// Used for key material and for working copies of plaintext, so that no
/// exit path leaves secret bytes behind in freed memory.
#[derive(Default, Clone)]
pub struct Block {
    data: Vec<u8>,
}

impl Block {
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 移出内部数据, 调用者负责之后的清理
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }

    pub fn to_arr<const N: usize>(data: &[u8]) -> Option<[u8; N]> {
        data.try_into().ok()
    }

    /// Panics if `data.len() != N`.
    ///
    /// Meant for chunks produced by `chunks_exact(N)`, where the length is
    /// already guaranteed.
    pub fn to_arr_uncheck<const N: usize>(data: &[u8]) -> [u8; N] {
        let mut arr = [0u8; N];
        arr.copy_from_slice(data);
        arr
    }

    /// `dst[i] ^= src[i]` for `i < min(dst.len(), src.len())`
    pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
        dst.iter_mut().zip(src.iter()).for_each(|(a, &b)| *a ^= b);
    }
}

impl Debug for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block({} bytes)", self.data.len())
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        self.data.as_slice()
    }
}

impl Deref for Block {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl DerefMut for Block {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}

impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&[u8]> for Block {
    fn from(value: &[u8]) -> Self {
        Self {
            data: value.to_vec(),
        }
    }
}

impl<A> Extend<A> for Block
where
    Vec<u8>: Extend<A>,
{
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        self.data.extend(iter)
    }
}
