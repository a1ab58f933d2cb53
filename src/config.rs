//! Configuration management for V2VChain

use crate::blockchain::DEFAULT_DIFFICULTY;
use crate::error::{ChainError, Result};
use crate::hash::DIGEST_HEX_LEN;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "v2vchain.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Leading zero hex characters required of every mined block.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.ledger.difficulty as usize > DIGEST_HEX_LEN {
            return Err(ChainError::InvalidConfig(format!(
                "ledger.difficulty must be at most {}, got {}",
                DIGEST_HEX_LEN, self.ledger.difficulty
            )));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging.level.parse().map_err(|_| {
            ChainError::InvalidConfig(format!("unknown logging.level '{}'", self.logging.level))
        })
    }
}

/// Parses and validates a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration at `path`. A missing file yields the defaults.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    match fs::read_to_string(path.as_ref()) {
        Ok(config_str) => parse_config(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.ledger.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(config.log_level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_sections() {
        let config = parse_config("[ledger]\ndifficulty = 2\n\n[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.ledger.difficulty, 2);
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_rejects_unreachable_difficulty() {
        let err = parse_config("[ledger]\ndifficulty = 65\n").unwrap_err();
        assert!(matches!(err, ChainError::InvalidConfig(_)));
        assert!(parse_config("[ledger]\ndifficulty = 64\n").is_ok());
    }

    #[test]
    fn test_rejects_bad_level_and_syntax() {
        assert!(parse_config("[logging]\nlevel = \"loud\"\n").is_err());
        assert!(parse_config("[ledger\n").is_err());
        assert!(parse_config("[ledger]\ndifficulty = \"four\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ledger]\ndifficulty = 3").unwrap();
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.ledger.difficulty, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.ledger.difficulty, DEFAULT_DIFFICULTY);
    }
}
