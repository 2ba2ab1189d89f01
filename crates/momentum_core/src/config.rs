//! TOML-backed tracker configuration.
//!
//! Stored at `<data dir>/momentum.toml`. Every field is optional:
//!
//! ```toml
//! backfill_on_add = false
//! log_level = "info"
//!
//! [chain]
//! mode = "rolling"
//! days = 30
//! ```

use crate::engine::chain::ChainMode;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the config inside the data directory.
pub const CONFIG_FILE_NAME: &str = "momentum.toml";

const MAX_ROLLING_DAYS: u32 = 366;

/// User-tunable tracker behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// Mark every day from start date through yesterday completed on add.
    #[serde(default)]
    pub backfill_on_add: bool,
    #[serde(default)]
    pub chain: ChainMode,
    /// Overrides the build-mode default log level.
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    RollingDaysOutOfRange(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::RollingDaysOutOfRange(days) => write!(
                f,
                "chain.days must be between 1 and {MAX_ROLLING_DAYS}, got {days}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::RollingDaysOutOfRange(_) => None,
        }
    }
}

impl TrackerConfig {
    /// Loads `<dir>/momentum.toml`, or defaults when the file does not exist.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads a config file, or defaults when it does not exist.
    ///
    /// # Errors
    /// - `Io` for read failures other than not-found.
    /// - `Parse` for invalid TOML or unknown fields.
    /// - `RollingDaysOutOfRange` for a rolling window outside `1..=366`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ChainMode::Rolling { days } = self.chain {
            if days == 0 || days > MAX_ROLLING_DAYS {
                return Err(ConfigError::RollingDaysOutOfRange(days));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, TrackerConfig};
    use crate::engine::chain::ChainMode;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrackerConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.chain, ChainMode::CalendarMonth);
        assert!(!config.backfill_on_add);
    }

    #[test]
    fn parses_rolling_chain_and_backfill() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("momentum.toml"),
            "backfill_on_add = true\n[chain]\nmode = \"rolling\"\ndays = 14\n",
        )
        .unwrap();

        let config = TrackerConfig::load_from_dir(dir.path()).unwrap();
        assert!(config.backfill_on_add);
        assert_eq!(config.chain, ChainMode::Rolling { days: 14 });
    }

    #[test]
    fn rejects_zero_day_window() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("momentum.toml"),
            "[chain]\nmode = \"rolling\"\ndays = 0\n",
        )
        .unwrap();

        let err = TrackerConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::RollingDaysOutOfRange(0)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("momentum.toml"), "backfil = true\n").unwrap();

        let err = TrackerConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
