//! Configuration loading and types for kidtalk
//!
//! Configuration is loaded in layers:
//! 1. Built-in defaults
//! 2. Config file (~/.config/kidtalk/config.toml)
//! 3. Environment variables (KIDTALK_*)
//! 4. CLI arguments (highest priority)

use crate::error::KidtalkError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file content
pub const DEFAULT_CONFIG: &str = r#"# Kidtalk Configuration
#
# Location: ~/.config/kidtalk/config.toml
# All settings can be overridden via CLI flags

[audio]
# Audio input device ("default" uses system default)
device = "default"

# Sample rate in Hz (the vosk model expects 16000)
sample_rate = 16000

# Samples per frame fed to the recognizer
frame_size = 1024

[model]
# Directory holding the vosk model (extracted directory or zip archive).
# Leave unset to use the data directory (~/.local/share/kidtalk/model).
# dir = "/path/to/model"

[listen]
# How long to wait for an answer before giving up, in seconds
timeout_secs = 5
"#;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub listen: ListenConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Input device name, or "default"
    #[serde(default = "default_device")]
    pub device: String,

    /// Sample rate in Hz (the vosk model expects 16000)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Samples per frame fed to the recognizer
    #[serde(default = "default_frame_size")]
    pub frame_size: usize,
}

/// Speech model configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Directory holding the extracted model or its zip archive.
    /// None = use the per-user data directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Listen session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    /// Wall-clock bound on one answer capture, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_frame_size() -> usize {
    1024
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
            frame_size: default_frame_size(),
        }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            model: ModelConfig::default(),
            listen: ListenConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kidtalk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path (for the voice model)
    pub fn data_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "kidtalk")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the model directory: explicit config value or the default
    /// location under the data directory.
    pub fn model_dir(&self) -> PathBuf {
        self.model
            .dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("model"))
    }

    /// Ensure required directories exist (config dir and model dir)
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        if let Some(config_dir) =
            directories::ProjectDirs::from("", "", "kidtalk").map(|d| d.config_dir().to_path_buf())
        {
            std::fs::create_dir_all(&config_dir)?;
            tracing::debug!("Ensured config directory exists: {:?}", config_dir);
        }

        let model_dir = self.model_dir();
        std::fs::create_dir_all(&model_dir)?;
        tracing::debug!("Ensured model directory exists: {:?}", model_dir);

        Ok(())
    }
}

/// Load configuration from file, with defaults for missing values
pub fn load_config(path: Option<&Path>) -> Result<Config, KidtalkError> {
    let mut config = Config::default();

    let config_path = path.map(PathBuf::from).or_else(Config::default_path);

    if let Some(ref path) = config_path {
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            let contents = std::fs::read_to_string(path)
                .map_err(|e| KidtalkError::Config(format!("Failed to read config: {}", e)))?;

            config = toml::from_str(&contents)
                .map_err(|e| KidtalkError::Config(format!("Invalid config: {}", e)))?;
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
        }
    }

    // Override from environment variables
    if let Ok(device) = std::env::var("KIDTALK_DEVICE") {
        config.audio.device = device;
    }
    if let Ok(dir) = std::env::var("KIDTALK_MODEL_DIR") {
        config.model.dir = Some(PathBuf::from(dir));
    }
    if let Ok(secs) = std::env::var("KIDTALK_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(secs) => config.listen.timeout_secs = secs,
            Err(_) => {
                return Err(KidtalkError::Config(format!(
                    "KIDTALK_TIMEOUT_SECS is not a number: {}",
                    secs
                )))
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.audio.frame_size, 1024);
        assert_eq!(config.listen.timeout_secs, 5);
        assert!(config.model.dir.is_none());
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.listen.timeout_secs, 5);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
            [audio]
            device = "pipewire"
            sample_rate = 16000
            frame_size = 8192

            [model]
            dir = "/opt/vosk/model"

            [listen]
            timeout_secs = 8
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.audio.device, "pipewire");
        assert_eq!(config.audio.frame_size, 8192);
        assert_eq!(config.model.dir, Some(PathBuf::from("/opt/vosk/model")));
        assert_eq!(config.listen.timeout_secs, 8);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
            [listen]
            timeout_secs = 3
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.listen.timeout_secs, 3);
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.frame_size, 1024);
    }

    #[test]
    fn test_env_overrides() {
        // One test covers every KIDTALK_* variable so parallel tests
        // never race on the process environment.
        let missing = Path::new("/nonexistent/kidtalk-config.toml");

        std::env::set_var("KIDTALK_DEVICE", "usb-mic");
        std::env::set_var("KIDTALK_MODEL_DIR", "/opt/vosk/model");
        std::env::set_var("KIDTALK_TIMEOUT_SECS", "9");

        let config = load_config(Some(missing)).unwrap();
        assert_eq!(config.audio.device, "usb-mic");
        assert_eq!(config.model.dir, Some(PathBuf::from("/opt/vosk/model")));
        assert_eq!(config.listen.timeout_secs, 9);

        std::env::set_var("KIDTALK_TIMEOUT_SECS", "soon");
        let err = load_config(Some(missing)).unwrap_err();
        assert!(matches!(err, KidtalkError::Config(_)));

        std::env::remove_var("KIDTALK_DEVICE");
        std::env::remove_var("KIDTALK_MODEL_DIR");
        std::env::remove_var("KIDTALK_TIMEOUT_SECS");

        let config = load_config(Some(missing)).unwrap();
        assert_eq!(config.audio.device, "default");
        assert!(config.model.dir.is_none());
        assert_eq!(config.listen.timeout_secs, 5);
    }

    #[test]
    fn test_model_dir_resolution() {
        let mut config = Config::default();
        config.model.dir = Some(PathBuf::from("/tmp/model"));
        assert_eq!(config.model_dir(), PathBuf::from("/tmp/model"));

        config.model.dir = None;
        assert!(config.model_dir().ends_with("model"));
    }
}
