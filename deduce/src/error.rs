use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LogError;
use crate::scores::StoreError;

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(ConfigError),

    #[error("{0}")]
    Log(LogError),

    #[error("{0}")]
    Store(StoreError),

    #[error("Terminal error: {0}")]
    Io(std::io::Error),

    #[error("Unknown challenge '{0}'. Run `deduce list` to see every challenge")]
    #[from(skip)]
    UnknownChallenge(String),
}
