use std::{error::Error, fmt::Display};

/// Errors of the block cipher core.
///
/// Every variant is detected synchronously at the session or dispatch
/// boundary. Messages may name the offending field but never carry key, IV,
/// data or chaining-state bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// 不支持的算法名
    UnsupportedAlgorithm(String),

    /// 不合法的密钥长度
    InvalidKeySize { target: usize, real: usize },

    /// 不合法的初始化向量长度
    InvalidIvSize { target: usize, real: usize },

    /// 输入数据长度不满足工作模式的对齐要求
    InvalidInputLength(String),

    /// 由合法的密钥无法生成轮密钥
    InternalScheduleFailure,

    /// 会话未绑定密钥(或已经`destroy`)时调用`run`
    KeyNotBound,
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedAlgorithm(name) => {
                f.write_fmt(format_args!("Unsupported algorithm `{name}`"))
            }
            Self::InvalidKeySize { target, real } => f.write_fmt(format_args!(
                "Invalid key size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidIvSize { target, real } => f.write_fmt(format_args!(
                "Invalid iv size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidInputLength(reason) => {
                f.write_fmt(format_args!("Invalid input length, {reason}"))
            }
            Self::InternalScheduleFailure => f.write_str("Key schedule derivation failed"),
            Self::KeyNotBound => f.write_str("No key bound to the cipher session"),
        }
    }
}

impl Error for CipherError {}

#[cfg(test)]
mod tests {
    use super::CipherError;

    #[test]
    fn error_message_names_field_only() {
        let e = CipherError::UnsupportedAlgorithm("foo".to_string());
        assert_eq!(e.to_string(), "Unsupported algorithm `foo`");

        let e = CipherError::InvalidKeySize {
            target: 32,
            real: 10,
        };
        assert_eq!(
            e.to_string(),
            "Invalid key size `10` not match to target size `32`"
        );
    }
}
