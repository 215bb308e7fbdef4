use std::path::PathBuf;

use config::{Config, ConfigError};
use serde::Deserialize;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct ReservaConfig {
    pub storage: Storage,
    pub logger: Logger,
}

impl ReservaConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("storage.data_dir", "data")?
            .set_default("logger.level", "INFO")?
            .add_source(config::File::with_name("reserva.toml").required(false))
            .add_source(config::Environment::with_prefix("RESERVA").separator("__"))
            .build()?
            .try_deserialize::<ReservaConfig>()
    }

    /// Installs the global fmt subscriber at the configured level.
    ///
    /// Does nothing if a subscriber has already been set for the process.
    pub fn init_logger(&self) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::from(&self.logger.level))
            .try_init();
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
    pub data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
