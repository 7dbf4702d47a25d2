use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.yaml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Window title, also shown in the custom title bar
    #[serde(default = "default_title")]
    pub title: String,

    /// Window width
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Window height
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    #[serde(default = "default_min_width")]
    pub min_width: f32,

    #[serde(default = "default_min_height")]
    pub min_height: f32,

    /// Height of the custom title bar
    #[serde(default = "default_title_bar_height")]
    pub title_bar_height: f32,

    /// Theme colors
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Window background color (hex)
    #[serde(default = "default_background_color")]
    pub background: String,

    /// Title bar background color (hex)
    #[serde(default = "default_title_bar_color")]
    pub title_bar: String,

    /// Title and icon color (hex)
    #[serde(default = "default_text_color")]
    pub text: String,

    /// Maximize/restore button hover color (hex)
    #[serde(default = "default_button_hover_color")]
    pub button_hover: String,

    /// Close button hover color (hex)
    #[serde(default = "default_close_hover_color")]
    pub close_hover: String,
}

// Default value functions
fn default_title() -> String { "Chromeless".to_string() }
fn default_window_width() -> f32 { 800.0 }
fn default_window_height() -> f32 { 450.0 }
fn default_min_width() -> f32 { 320.0 }
fn default_min_height() -> f32 { 200.0 }
fn default_title_bar_height() -> f32 { 32.0 }
fn default_background_color() -> String { "#FFFFFF".to_string() }
fn default_title_bar_color() -> String { "#1E1E1E".to_string() }
fn default_text_color() -> String { "#F0F0F0".to_string() }
fn default_button_hover_color() -> String { "#3A3A3A".to_string() }
fn default_close_hover_color() -> String { "#E81123".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            min_width: default_min_width(),
            min_height: default_min_height(),
            title_bar_height: default_title_bar_height(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: default_background_color(),
            title_bar: default_title_bar_color(),
            text: default_text_color(),
            button_hover: default_button_hover_color(),
            close_hover: default_close_hover_color(),
        }
    }
}

impl Config {
    /// Get the config file path: working directory, next to the executable, then
    /// the user config directory
    pub fn config_path() -> PathBuf {
        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            return local_path;
        }

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let exe_config = exe_dir.join(CONFIG_FILE);
                if exe_config.exists() {
                    return exe_config;
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("chromeless").join(CONFIG_FILE);
            if user_config.exists() {
                return user_config;
            }
        }

        local_path
    }

    /// Load config from file, or use defaults if not exists
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Config::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("failed to parse {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("failed to read {}: {}", path.display(), e),
        }

        Config::default()
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config = Config::parse("title: Notes\nwindow_width: 1024\ntheme:\n  close_hover: \"#C42B1C\"\n").unwrap();

        assert_eq!(config.title, "Notes");
        assert_eq!(config.window_width, 1024.0);
        assert_eq!(config.window_height, 450.0);
        assert_eq!(config.title_bar_height, 32.0);
        assert_eq!(config.theme.close_hover, "#C42B1C");
        assert_eq!(config.theme.title_bar, "#1E1E1E");
    }

    #[test]
    fn empty_mapping_is_all_defaults() {
        let config = Config::parse("{}").unwrap();
        let defaults = Config::default();

        assert_eq!(config.title, defaults.title);
        assert_eq!(config.min_width, defaults.min_width);
        assert_eq!(config.theme.background, defaults.theme.background);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(Config::parse("window_width: [wide").is_err());
        assert!(Config::parse("window_width: wide").is_err());
    }
}
