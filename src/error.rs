use cipher::CipherError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AkryptError {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("Invalid config, {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::AkryptError;
    use cipher::CipherError;

    #[test]
    fn cipher_error_is_transparent() {
        let e = AkryptError::from(CipherError::UnsupportedAlgorithm("foo".to_string()));
        assert_eq!(e.to_string(), "Unsupported algorithm `foo`");
        assert_eq!(
            AkryptError::Config("bad".to_string()).to_string(),
            "Invalid config, bad"
        );
    }
}
