//! Engine configuration, loadable from TOML
//!
//! Every field has a default, so a partial file (or none at all) is valid:
//!
//! ```toml
//! difficulty = "master"
//! hint_level = "deep"
//! restricted = "black"
//! cache_capacity = 4096
//! seed = 42
//! ```

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::Stone;
use crate::error::ConfigError;
use crate::hint::HintLevel;
use crate::rules::DEFAULT_CAPACITY;
use crate::search::{Difficulty, DifficultyPolicy};

/// Session settings for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub hint_level: HintLevel,
    /// Color bound by the forbidden-move rules
    pub restricted: Stone,
    /// Verdict cache bound
    pub cache_capacity: usize,
    /// Fixed RNG seed; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            hint_level: HintLevel::default(),
            restricted: Stone::Black,
            cache_capacity: DEFAULT_CAPACITY,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity < 2 {
            return Err(ConfigError::Validation(format!(
                "cache_capacity must be >= 2, got {}",
                self.cache_capacity
            )));
        }
        if self.restricted == Stone::Empty {
            return Err(ConfigError::Validation(
                "restricted must be \"black\" or \"white\"".into(),
            ));
        }
        Ok(())
    }

    /// Search policy of the configured preset
    #[inline]
    pub fn policy(&self) -> DifficultyPolicy {
        self.difficulty.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.restricted, Stone::Black);
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config =
            EngineConfig::from_toml_str("difficulty = \"master\"\nseed = 7\n").expect("valid toml");
        assert_eq!(config.difficulty, Difficulty::Master);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.hint_level, HintLevel::default());
        assert_eq!(config.policy(), Difficulty::Master.policy());
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            difficulty = "novice"
            hint_level = "deep"
            restricted = "white"
            cache_capacity = 64
        "#;
        let config = EngineConfig::from_toml_str(toml).expect("valid toml");
        assert_eq!(config.difficulty, Difficulty::Novice);
        assert_eq!(config.hint_level, HintLevel::Deep);
        assert_eq!(config.restricted, Stone::White);
        assert_eq!(config.cache_capacity, 64);
    }

    #[test]
    fn test_unknown_difficulty_is_parse_error() {
        let err = EngineConfig::from_toml_str("difficulty = \"grandmaster\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_validation_rejects_tiny_cache() {
        let err = EngineConfig::from_toml_str("cache_capacity = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_empty_restricted() {
        let config = EngineConfig {
            restricted: Stone::Empty,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = Path::new("/nonexistent/renju/engine.toml");
        let config = EngineConfig::load_or_default(path).expect("defaults");
        assert_eq!(config, EngineConfig::default());

        let err = EngineConfig::load(path).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = EngineConfig {
            difficulty: Difficulty::Journeyman,
            seed: Some(3),
            ..EngineConfig::default()
        };
        let text = toml::to_string(&config).expect("serialize");
        assert_eq!(EngineConfig::from_toml_str(&text).expect("parse"), config);
    }
}
