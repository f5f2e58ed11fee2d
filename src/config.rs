use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use tracing::{info, warn};

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BoardConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
    #[serde(default)]
    pub show_paths: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_width() -> usize { 11 }
fn default_height() -> usize { 11 }
fn default_window_title() -> String { "Pathboard".to_string() }
fn default_cell_size() -> f32 { 48.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_grid() -> bool { true }
fn default_filter() -> String { "info".to_string() }
fn default_enable_action_log() -> bool { false }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_grid: default_show_grid(),
            show_paths: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read and parse `path` without logging or falling back
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::from_toml_str(&contents).map_err(ConfigError::Parse)
    }

    /// Load configuration from `path`, or use defaults if it is missing or malformed
    pub fn load(path: &str) -> Self {
        Self::or_default(path, Self::read(path))
    }

    /// Log the result of [`Config::read`] and fall back to defaults on failure
    pub fn or_default(path: &str, read: Result<Self, ConfigError>) -> Self {
        match read {
            Ok(config) => {
                info!(path, "loaded configuration");
                config
            }
            Err(ConfigError::Parse(e)) => {
                warn!(path, error = %e, "failed to parse configuration, using defaults");
                Config::default()
            }
            Err(ConfigError::Read(_)) => {
                info!(path, "no configuration file, using defaults");
                Config::default()
            }
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "cannot read configuration: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [board]
            width = 7

            [visual]
            show_paths = true

            [logging]
            filter = "pathboard=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.board.width, 7);
        assert_eq!(config.board.height, 11);
        assert!(config.visual.show_paths);
        assert!(config.visual.show_grid);
        assert_eq!(config.logging.filter, "pathboard=debug");
        assert_eq!(config.logging.action_log_path, "action_log.json");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml_str("[board]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load("does/not/exist/config.toml");
        assert_eq!(config, Config::default());
        assert!(matches!(
            Config::read("does/not/exist/config.toml"),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "pathboard-bad-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[board]\nwidth = \"wide\"\n").unwrap();
        let path = path.to_str().unwrap();

        assert!(matches!(Config::read(path), Err(ConfigError::Parse(_))));
        assert_eq!(Config::load(path), Config::default());
        fs::remove_file(path).unwrap();
    }
}
