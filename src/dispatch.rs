use crate::{AkryptError, Environment};
use cipher::{Algorithm, Direction, Mode, Session};
use std::fmt::{Debug, Formatter};
use utils::Block;

/// One encrypt/decrypt request: algorithm name, mode and the exact key and IV
/// bytes. The key copy is wiped on drop.
pub struct CipherConfig {
    algorithm: String,
    mode: Mode,
    key: Block,
    iv: Vec<u8>,
}

impl CipherConfig {
    pub fn new(algorithm: &str, mode: Mode, key: &[u8], iv: &[u8]) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            mode,
            key: Block::from(key),
            iv: iv.to_vec(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn key_len(&self) -> usize {
        self.key.len()
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl Debug for CipherConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherConfig")
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode)
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

// 离开作用域时销毁会话, 并从环境中注销
struct SessionGuard<'a> {
    env: &'a Environment,
    session: Session,
}

impl<'a> SessionGuard<'a> {
    fn open(env: &'a Environment, algorithm: Algorithm) -> Self {
        env.acquire();
        Self {
            env,
            session: Session::new(algorithm),
        }
    }
}

impl<'a> Drop for SessionGuard<'a> {
    fn drop(&mut self) {
        self.session.destroy();
        let wiped = self.session.is_zeroized();
        if !wiped {
            log::error!("{} session not wiped on release", self.session.algorithm());
        }
        self.env.release(wiped);
    }
}

/// Runs single-shot operations, each in a fresh session that is destroyed
/// before the call returns.
pub struct Dispatcher<'a> {
    env: &'a Environment,
}

impl<'a> Dispatcher<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &'a Environment {
        self.env
    }

    pub fn resolve(&self, name: &str) -> Result<Algorithm, AkryptError> {
        Ok(Algorithm::resolve(name)?)
    }

    pub fn execute(
        &self,
        config: &CipherConfig,
        direction: Direction,
        buffer: &[u8],
    ) -> Result<Vec<u8>, AkryptError> {
        let algorithm = self.resolve(config.algorithm())?;
        let mut guard = SessionGuard::open(self.env, algorithm);

        guard.session.bind_key(config.key.as_slice())?;

        let mut data = Block::from(buffer);
        guard
            .session
            .run(direction, config.mode(), config.iv(), data.as_mut_slice())?;

        log::debug!(
            "{algorithm} {} {direction} done, {} bytes",
            config.mode(),
            data.len()
        );

        Ok(data.into_vec())
    }

    pub fn encrypt(&self, config: &CipherConfig, buffer: &[u8]) -> Result<Vec<u8>, AkryptError> {
        self.execute(config, Direction::Encrypt, buffer)
    }

    pub fn decrypt(&self, config: &CipherConfig, buffer: &[u8]) -> Result<Vec<u8>, AkryptError> {
        self.execute(config, Direction::Decrypt, buffer)
    }
}
