use crate::AkryptError;
use config::Config;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogSink {
    #[default]
    Stderr,
    Stdout,
    // 不安装日志后端
    Off,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AkryptConfig {
    // off, error, warn, info, debug, trace
    pub log_level: String,

    pub log_sink: LogSink,
}

impl Default for AkryptConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_sink: LogSink::default(),
        }
    }
}

impl AkryptConfig {
    /// Defaults, then `file` (JSON or JSON5, optional), then `AKRYPT__*`
    /// environment variables.
    pub fn load(file: Option<&str>) -> Result<Self, AkryptError> {
        let default_config = Config::try_from(&AkryptConfig::default())
            .map_err(|e| AkryptError::Config(e.to_string()))?;

        let mut config = Config::builder().add_source(default_config);
        if let Some(f) = file {
            config = config.add_source(config::File::with_name(f).required(false));
        }
        config = config.add_source(
            config::Environment::with_prefix("AKRYPT")
                .try_parsing(true)
                .separator("__"),
        );

        let akconfig: AkryptConfig = config
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AkryptError::Config(e.to_string()))?;
        akconfig.level_filter()?;

        log::trace!("{:?}", akconfig);

        Ok(akconfig)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, AkryptError> {
        self.log_level.parse::<LevelFilter>().map_err(|_| {
            AkryptError::Config(format!("invalid log level `{}`", self.log_level))
        })
    }
}
