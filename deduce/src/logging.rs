use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use derive_more::From;
use env_logger::{Builder, Target};
use thiserror::Error;

use crate::config::LogConfig;

#[derive(Debug, From, Error)]
pub enum LogError {
    #[error("Failed to open log file '{path}': {error}")]
    #[from(skip)]
    OpenFile {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to install logger: {0}")]
    Install(log::SetLoggerError),
}

/// Send logs to `file`, so they never end up on top of the terminal UI
///
/// The configured level is used unless `RUST_LOG` is set.
pub fn init(config: &LogConfig, file: &Path) -> Result<(), LogError> {
    let open_error = |error| LogError::OpenFile {
        path: file.to_path_buf(),
        error,
    };

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(open_error)?;
    }

    let target = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(open_error)?;

    builder(config)
        .target(Target::Pipe(Box::new(target)))
        .try_init()?;

    log::info!("Logging to {}", file.display());
    Ok(())
}

fn builder(config: &LogConfig) -> Builder {
    let mut builder = Builder::new();
    builder
        .format_timestamp_millis()
        .parse_filters(&config.level)
        .parse_default_env();
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level() {
        let config = LogConfig {
            level: "warn".to_string(),
            file: None,
        };
        let logger = builder(&config).build();

        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(logger.filter(), log::LevelFilter::Warn);
        }
    }

    #[test]
    fn test_per_module_level() {
        let config = LogConfig {
            level: "info,scribe=trace".to_string(),
            file: None,
        };
        let logger = builder(&config).build();

        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(logger.filter(), log::LevelFilter::Trace);
        }
    }
}
