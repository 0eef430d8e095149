//! 密钥, 分组密码和工作模式组合成的会话<br>
//!
//! 生命周期: `create` -> `bind_key` -> `run` -> `destroy`. `destroy` 无论之前的 `run`
//! 是否失败都会清零密钥, 轮密钥和链接状态; 也会在 `Drop` 时执行.

use crate::block_cipher::{Kuznyechik, Magma};
use crate::{Algorithm, CipherError, Direction, KeyMaterial, KeyedBlockCipher, Mode, ModeEngine};
use zeroize::Zeroize;

pub struct CipherSession<E, const N: usize>
where
    E: KeyedBlockCipher<N>,
{
    key: Option<KeyMaterial>,
    // destroy之后保留(已清零), 便于检查
    cipher: Option<E>,
    engine: Option<ModeEngine<N>>,
}

impl<E, const N: usize> CipherSession<E, N>
where
    E: KeyedBlockCipher<N>,
{
    pub const fn new() -> Self {
        Self {
            key: None,
            cipher: None,
            engine: None,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        E::ALGORITHM
    }

    pub fn block_size(&self) -> usize {
        N
    }

    pub fn is_key_bound(&self) -> bool {
        self.key.is_some()
    }

    /// Validates `key` against the algorithm's key length and derives the
    /// schedule. A previously bound key is wiped first.
    pub fn bind_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        let key = KeyMaterial::new(E::ALGORITHM, key)?;
        let cipher = E::with_key(key.as_slice()).map_err(|_| CipherError::InternalScheduleFailure)?;

        self.destroy();
        self.key = Some(key);
        self.cipher = Some(cipher);
        log::trace!("{} session key bound", E::ALGORITHM);

        Ok(())
    }

    /// Seeds fresh chaining state from `iv` and transforms `data` in place.
    pub fn run(
        &mut self,
        direction: Direction,
        mode: Mode,
        iv: &[u8],
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        let cipher = match (&self.key, &self.cipher) {
            (Some(_), Some(cipher)) => cipher,
            _ => return Err(CipherError::KeyNotBound),
        };

        let engine = self.engine.insert(ModeEngine::new(mode, iv)?);
        engine.run(direction, cipher, data)?;
        log::trace!(
            "{} {mode} {direction} over {} bytes",
            E::ALGORITHM,
            data.len()
        );

        Ok(())
    }

    pub fn encrypt(&mut self, mode: Mode, iv: &[u8], data: &mut [u8]) -> Result<(), CipherError> {
        self.run(Direction::Encrypt, mode, iv, data)
    }

    pub fn decrypt(&mut self, mode: Mode, iv: &[u8], data: &mut [u8]) -> Result<(), CipherError> {
        self.run(Direction::Decrypt, mode, iv, data)
    }

    /// 可重复调用
    pub fn destroy(&mut self) {
        if let Some(mut key) = self.key.take() {
            key.zeroize();
        }
        if let Some(cipher) = self.cipher.as_mut() {
            cipher.zeroize();
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.zeroize();
        }
    }

    pub fn is_zeroized(&self) -> bool {
        self.key.is_none()
            && self.cipher.as_ref().map_or(true, |c| c.is_zeroized())
            && self.engine.as_ref().map_or(true, |e| e.is_zeroized())
    }
}

impl<E, const N: usize> Default for CipherSession<E, N>
where
    E: KeyedBlockCipher<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, const N: usize> Drop for CipherSession<E, N>
where
    E: KeyedBlockCipher<N>,
{
    fn drop(&mut self) {
        self.destroy();
    }
}

/// A [`CipherSession`] over one of the supported algorithms, chosen at runtime.
pub enum Session {
    Kuznyechik(CipherSession<Kuznyechik, 16>),
    Magma(CipherSession<Magma, 8>),
}

macro_rules! session_forward {
    ($SELF: expr, $S: ident => $E: expr) => {
        match $SELF {
            Session::Kuznyechik($S) => $E,
            Session::Magma($S) => $E,
        }
    };
}

impl Session {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Kuznyechik => Self::Kuznyechik(CipherSession::new()),
            Algorithm::Magma => Self::Magma(CipherSession::new()),
        }
    }

    /// `name` must be exactly one of the [`Algorithm`] names.
    pub fn create(name: &str) -> Result<Self, CipherError> {
        Algorithm::resolve(name).map(Self::new)
    }

    pub fn algorithm(&self) -> Algorithm {
        session_forward!(self, s => s.algorithm())
    }

    pub fn block_size(&self) -> usize {
        session_forward!(self, s => s.block_size())
    }

    pub fn is_key_bound(&self) -> bool {
        session_forward!(self, s => s.is_key_bound())
    }

    pub fn bind_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        session_forward!(self, s => s.bind_key(key))
    }

    pub fn run(
        &mut self,
        direction: Direction,
        mode: Mode,
        iv: &[u8],
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        session_forward!(self, s => s.run(direction, mode, iv, data))
    }

    pub fn encrypt(&mut self, mode: Mode, iv: &[u8], data: &mut [u8]) -> Result<(), CipherError> {
        self.run(Direction::Encrypt, mode, iv, data)
    }

    pub fn decrypt(&mut self, mode: Mode, iv: &[u8], data: &mut [u8]) -> Result<(), CipherError> {
        self.run(Direction::Decrypt, mode, iv, data)
    }

    pub fn destroy(&mut self) {
        session_forward!(self, s => s.destroy())
    }

    pub fn is_zeroized(&self) -> bool {
        session_forward!(self, s => s.is_zeroized())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("algorithm", &self.algorithm())
            .field("key_bound", &self.is_key_bound())
            .finish_non_exhaustive()
    }
}
