use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::challenges::PoolFilter;

pub use self::log::LogConfig;
pub use self::scores::ScoresConfig;

pub mod log;
pub mod scores;

const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "DEDUCE_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// How often the elapsed time on screen refreshes
    pub tick_interval_ms: u64,
    /// Where scores and logs are kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Length bounds for passages of the challenge tier
    pub challenge_pool: PoolFilter,
    pub scores: ScoresConfig,
    pub log: LogConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            data_dir: None,
            challenge_pool: PoolFilter::default(),
            scores: ScoresConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to write default settings: {0}")]
    WriteDefaults(toml::ser::Error),

    #[error("Failed to write '{path}': {error}")]
    #[from(skip)]
    WriteSettings {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("'tick_interval_ms' must be greater than zero")]
    #[from(skip)]
    ZeroTickInterval,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Load settings from defaults, then `settings.toml`, then `DEDUCE_*` environment variables
    ///
    /// A commented-out copy of the defaults is written on first run.
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("com", "Deduce", "Deduce");

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| dirs.as_ref().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join(SETTINGS_FILE);
        if !settings_toml.exists() {
            write_defaults(&settings_toml)?;
        }

        let settings = Self::load(&settings_toml)?;

        let data_dir = settings
            .data_dir
            .clone()
            .or_else(|| dirs.as_ref().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| config_dir.join("data"));

        Ok(Self {
            settings,
            config_dir,
            data_dir,
        })
    }

    fn load(settings_toml: &Path) -> Result<Settings, ConfigError> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(settings_toml))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        if settings.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(settings)
    }

    /// The engine configuration for new typing sessions
    pub fn session_configuration(&self) -> scribe::Configuration {
        scribe::Configuration {
            tick_interval: Duration::from_millis(self.settings.tick_interval_ms),
        }
    }

    /// The file logs are written to
    pub fn log_file(&self) -> PathBuf {
        self.settings
            .log
            .file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("deduce.log"))
    }

    /// The directory high scores are stored in
    pub fn scores_dir(&self) -> PathBuf {
        self.data_dir.join("scores")
    }
}

fn write_defaults(path: &Path) -> Result<(), ConfigError> {
    let defaults = toml::to_string_pretty(&Settings::default())?;
    let commented: String = defaults
        .lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("# {line}\n")
            }
        })
        .collect();

    std::fs::write(path, commented).map_err(|error| ConfigError::WriteSettings {
        path: path.to_path_buf(),
        error,
    })?;
    ::log::info!("Wrote default settings to {}", path.display());
    Ok(())
}
