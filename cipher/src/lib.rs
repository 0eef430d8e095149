mod error;
pub use error::CipherError;

mod algorithm;
pub use algorithm::Algorithm;

mod key;
pub use key::KeyMaterial;

pub mod block_cipher;
pub use block_cipher::{BlockCipher, BlockDecrypt, BlockEncrypt, KeyedBlockCipher};

pub mod cipher_mode;
pub use cipher_mode::{Direction, Mode, ModeEngine};

mod session;
pub use session::{CipherSession, Session};
