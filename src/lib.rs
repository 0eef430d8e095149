pub mod config;
pub mod dispatch;
pub mod env;
pub mod error;
pub mod operation;

pub use self::config::{AkryptConfig, LogSink};
pub use dispatch::{CipherConfig, Dispatcher};
pub use env::Environment;
pub use error::AkryptError;
pub use operation::{CipherOperation, DataFormat, OperationRequest};

pub use cipher::{Algorithm, CipherError, Direction, Mode};
