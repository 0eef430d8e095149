//! 文本形式的加解密操作<br>
//!
//! 请求是一个JSON对象:
//!
//! ```json
//! {
//!     "algorithm": "magma",
//!     "key": "<hex>",
//!     "iv": "<hex>",
//!     "mode": "CTR",
//!     "input_format": "raw",
//!     "output_format": "hex"
//! }
//! ```
//!
//! 输入输出格式为 `hex`, `base64` 或 `raw`(UTF-8文本). 不做填充, ECB/CBC的输入必须是分组长度的整数倍.

use crate::{CipherConfig, Dispatcher};
use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cipher::{Direction, Mode};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use zeroize::{Zeroize, Zeroizing};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Hex,
    Base64,
    Raw,
}

impl DataFormat {
    pub fn decode(self, input: &str) -> anyhow::Result<Vec<u8>> {
        match self {
            DataFormat::Hex => hex::decode(input.trim()).context("input is not a hex string"),
            DataFormat::Base64 => STANDARD
                .decode(input.trim())
                .context("input is not a base64 string"),
            DataFormat::Raw => Ok(input.as_bytes().to_vec()),
        }
    }

    pub fn encode(self, data: &[u8]) -> anyhow::Result<String> {
        match self {
            DataFormat::Hex => Ok(hex::encode(data)),
            DataFormat::Base64 => Ok(STANDARD.encode(data)),
            DataFormat::Raw => String::from_utf8(data.to_vec())
                .map_err(|e| {
                    let mut bytes = e.into_bytes();
                    bytes.zeroize();
                    anyhow::anyhow!("output is not valid UTF-8, use `hex` or `base64`")
                }),
        }
    }
}

#[derive(Deserialize)]
pub struct OperationRequest {
    pub algorithm: String,
    key: String,
    iv: String,
    pub mode: Mode,
    pub input_format: DataFormat,
    pub output_format: DataFormat,
}

impl OperationRequest {
    pub fn parse(request: &str) -> anyhow::Result<Self> {
        serde_json::from_str(request).context("invalid operation request")
    }

    pub fn key(&self) -> anyhow::Result<Zeroizing<Vec<u8>>> {
        hex::decode(&self.key)
            .map(Zeroizing::new)
            .context("key is not a hex string")
    }

    pub fn iv(&self) -> anyhow::Result<Vec<u8>> {
        hex::decode(&self.iv).context("iv is not a hex string")
    }
}

impl Debug for OperationRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRequest")
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode)
            .field("input_format", &self.input_format)
            .field("output_format", &self.output_format)
            .finish_non_exhaustive()
    }
}

impl Drop for OperationRequest {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherOperation {
    Encrypt,
    Decrypt,
}

impl CipherOperation {
    pub fn direction(self) -> Direction {
        match self {
            CipherOperation::Encrypt => Direction::Encrypt,
            CipherOperation::Decrypt => Direction::Decrypt,
        }
    }

    pub fn run(self, dispatcher: &Dispatcher, input: &str, request: &str) -> anyhow::Result<String> {
        let request = OperationRequest::parse(request)?;
        let (key, iv) = (request.key()?, request.iv()?);
        let data = Zeroizing::new(request.input_format.decode(input)?);
        log::debug!("{:?} {}", request, self.direction());

        let config = CipherConfig::new(&request.algorithm, request.mode, &key, &iv);
        let output = Zeroizing::new(dispatcher.execute(&config, self.direction(), &data)?);

        request.output_format.encode(&output)
    }
}
