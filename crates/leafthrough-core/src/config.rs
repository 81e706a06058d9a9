use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::page::ViewKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ui: UiConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Articles shown per index page
    #[serde(default = "default_articles_per_page")]
    pub articles_per_page: u32,
    /// Index layout shown on startup
    #[serde(default)]
    pub default_view: ViewKind,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            articles_per_page: default_articles_per_page(),
            default_view: ViewKind::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate viewport scrolling instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds (0 disables animation)
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve applied to animated scrolls
    #[serde(default)]
    pub easing: Easing,
    /// Lines moved per scroll step (keys and mouse wheel)
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Animation frame rate while a scroll is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: Easing::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Easing curve family for animated scrolling. All curves are of the
/// ease-out kind: fast start, gentle landing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Cubic ease-out
    #[default]
    Cubic,
    /// Quintic ease-out, more abrupt than cubic
    Quint,
    /// Exponential ease-out, the snappiest of the set
    Expo,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("leafthrough")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_articles_per_page() -> u32 {
    6
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u16 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/leafthrough/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("leafthrough")
            .join("config.toml")
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("leafthrough.db")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Articles per index page, guarded against a zero config value
    pub fn articles_per_page(&self) -> u32 {
        self.ui.articles_per_page.max(1)
    }
}
