use std::path::Path;

use crate::error::ConfigError;
use crate::game::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ui: UiConfig,
}

/// Board size and the two players' colours.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub first_player: String,
    pub second_player: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            first_player: "red".to_string(),
            second_player: "blue".to_string(),
        }
    }
}

impl GameConfig {
    /// Validate the game section on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIMENSION).contains(&self.width) {
            return Err(ConfigError::Validation(format!(
                "game.width must be between 1 and {MAX_DIMENSION}"
            )));
        }
        if !(1..=MAX_DIMENSION).contains(&self.height) {
            return Err(ConfigError::Validation(format!(
                "game.height must be between 1 and {MAX_DIMENSION}"
            )));
        }
        if self.first_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "game.first_player must not be empty".into(),
            ));
        }
        if self.second_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "game.second_player must not be empty".into(),
            ));
        }
        if self.first_player == self.second_player {
            return Err(ConfigError::Validation(
                "game.first_player and game.second_player must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Terminal front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long to wait for a key press before redrawing, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            poll_interval_ms: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
