//! Configuration management for portfolio-shell
//!
//! Supports configuration via:
//! 1. Config file (~/.config/portfolio-shell/config.toml)
//! 2. Environment variables (PORTFOLIO_DATA_DIR, PORTFOLIO_TRIGGER_WORD, PORTFOLIO_SOUND_PLAYER)
//! 3. CLI arguments (override file/env settings)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where persisted preferences live
    pub storage: StorageSettings,

    /// Command overlay settings
    pub terminal: TerminalSettings,

    /// Sound playback settings
    pub sound: SoundSettings,

    /// CI/CD transcript replay settings
    pub demo: DemoSettings,
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Data directory (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Command overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Word that opens the hidden overlay when typed on the landing screen
    pub trigger_word: String,

    /// Prompt shown before each command
    pub prompt: String,

    /// Title shown in the welcome entry
    pub title: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            trigger_word: "terminal".to_string(),
            prompt: "jd@portfolio:~$".to_string(),
            title: "JDTerminal v1.0.0".to_string(),
        }
    }
}

/// Sound settings; whether sound is enabled is a persisted preference, not config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// External player program (e.g. paplay, afplay); terminal bell when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,

    /// Player argument templates: {file}, {volume}, {percent}, {pa_volume}
    pub player_args: Vec<String>,

    /// Directory holding click.mp3, success.mp3, ...
    pub asset_dir: PathBuf,

    /// Playback volume (0.0 - 1.0)
    pub volume: f32,

    /// Ring the terminal bell when no player is configured
    pub bell: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            player: None,
            player_args: crate::sound::DEFAULT_PLAYER_ARGS
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
            asset_dir: default_data_dir().join("sounds"),
            volume: crate::sound::DEFAULT_VOLUME,
            bell: true,
        }
    }
}

/// Slowest accepted replay speed
pub const MIN_DEMO_SPEED: f64 = 0.01;

/// Transcript replay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Playback speed multiplier
    pub speed: f64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("portfolio-shell")
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portfolio-shell")
            .join("config.toml")
    }

    /// Load config from default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from specific path
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("PORTFOLIO_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(word) = std::env::var("PORTFOLIO_TRIGGER_WORD") {
            self.terminal.trigger_word = word;
        }
        if let Ok(player) = std::env::var("PORTFOLIO_SOUND_PLAYER") {
            self.sound.player = Some(player);
        }

        self
    }

    /// Save config to default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to specific path
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let word = &self.terminal.trigger_word;
        if word.is_empty() || word.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "terminal.trigger_word must be a single non-empty word, got {:?}",
                word
            )));
        }

        if !(self.demo.speed.is_finite() && self.demo.speed >= MIN_DEMO_SPEED) {
            return Err(ConfigError::Invalid(format!(
                "demo.speed must be at least {}, got {}",
                MIN_DEMO_SPEED,
                self.demo.speed
            )));
        }

        if !(0.0..=1.0).contains(&self.sound.volume) {
            return Err(ConfigError::Invalid(format!(
                "sound.volume must be between 0 and 1, got {}",
                self.sound.volume
            )));
        }

        Ok(())
    }

    /// Directory holding the persisted preference records
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
    }

    /// Generate example config content
    pub fn example() -> String {
        let example = Config::default();
        toml::to_string_pretty(&example).unwrap_or_default()
    }
}

/// Builder for creating Config programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.storage.data_dir = Some(dir.into());
        self
    }

    pub fn trigger_word(mut self, word: impl Into<String>) -> Self {
        self.config.terminal.trigger_word = word.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.terminal.prompt = prompt.into();
        self
    }

    pub fn sound_player(mut self, program: impl Into<String>) -> Self {
        self.config.sound.player = Some(program.into());
        self
    }

    pub fn demo_speed(mut self, speed: f64) -> Self {
        self.config.demo.speed = speed;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.terminal.trigger_word, "terminal");
        assert_eq!(config.terminal.prompt, "jd@portfolio:~$");
        assert_eq!(config.demo.speed, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .data_dir("/tmp/portfolio")
            .trigger_word("matrix")
            .demo_speed(4.0)
            .build();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/portfolio"));
        assert_eq!(config.terminal.trigger_word, "matrix");
        assert_eq!(config.demo.speed, 4.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let empty_word = ConfigBuilder::new().trigger_word("").build();
        assert!(matches!(empty_word.validate(), Err(ConfigError::Invalid(_))));

        let spaced_word = ConfigBuilder::new().trigger_word("open sesame").build();
        assert!(spaced_word.validate().is_err());

        let zero_speed = ConfigBuilder::new().demo_speed(0.0).build();
        assert!(zero_speed.validate().is_err());

        let crawl = ConfigBuilder::new().demo_speed(1e-300).build();
        assert!(crawl.validate().is_err());
        assert!(ConfigBuilder::new().demo_speed(MIN_DEMO_SPEED).build().validate().is_ok());

        let mut loud = Config::default();
        loud.sound.volume = 1.5;
        assert!(loud.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[terminal]\ntrigger_word = \"konami\"\n").unwrap();

        let config: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.terminal.trigger_word, "konami");
        assert_eq!(config.terminal.title, "JDTerminal v1.0.0");
        assert_eq!(config.demo.speed, 1.0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ConfigBuilder::new().prompt("me@home:~$").build();
        config.save_to(path.clone()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let reloaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(reloaded.terminal.prompt, "me@home:~$");
    }

    #[test]
    fn test_player_args_from_file() {
        let content = r#"
[sound]
player = "afplay"
player_args = ["-v", "{volume}"]
volume = 0.5
"#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.sound.player.as_deref(), Some("afplay"));
        assert_eq!(config.sound.player_args, ["-v", "{volume}"]);
        assert_eq!(config.sound.volume, 0.5);

        assert_eq!(Config::default().sound.player_args, ["{file}"]);
    }

    #[test]
    fn test_example_config() {
        let example = Config::example();
        assert!(example.contains("[terminal]"));
        assert!(example.contains("[demo]"));
    }
}
