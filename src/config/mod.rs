//! Configuration management.
//!
//! Configuration is read from `~/.config/newsticker/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::aggregator::DEFAULT_WORKERS;
use crate::fetcher::http_fetcher::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::overlay::{FadePlan, OverlaySettings, SizePolicy};
use crate::store::Margins;

/// Sources queried when the config names none.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://g1.globo.com/dynamo/rss2.xml",
    "https://g1.globo.com/brasil/rss2.xml",
    "https://g1.globo.com/mundo/rss2.xml",
    "https://g1.globo.com/economia/rss2.xml",
    "https://forbes.com.br/feed/",
    "https://www.forbes.com/most-popular/feed/",
    "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml",
    "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
    "https://rss.nytimes.com/services/xml/rss/nyt/Technology.xml",
    "https://rss.nytimes.com/services/xml/rss/nyt/Business.xml",
    "http://feeds.bbci.co.uk/news/world/rss.xml",
    "http://feeds.reuters.com/reuters/topNews",
    "http://feeds.feedburner.com/TechCrunch/",
    "https://feeds.ign.com/ign/all",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds: Vec<String>,
    pub fetch: FetchConfig,
    pub overlay: OverlayConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
            fetch: FetchConfig::default(),
            overlay: OverlayConfig::default(),
            colors: ColorConfig::default(),
            keybindings: KeybindingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub workers: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workers: DEFAULT_WORKERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Overlay size, placement and animation. Sizes are in terminal cells.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub width_ratio: f32,
    pub height_ratio: f32,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
    pub margin_right: i32,
    pub margin_bottom: i32,
    pub opacity: f32,
    pub fade_first_step: u32,
    pub fade_steps: u32,
    pub fade_step_ms: u64,
    pub fade_ms: u64,
    pub reveal_delay_ms: u64,
    pub scroll_step: i32,
    pub wrap_padding: i32,
    pub position_file: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let settings = OverlaySettings::default();
        Self {
            width_ratio: settings.size.width_ratio,
            height_ratio: settings.size.height_ratio,
            min_width: settings.size.min_width,
            max_width: settings.size.max_width,
            min_height: settings.size.min_height,
            max_height: settings.size.max_height,
            margin_right: 2,
            margin_bottom: 1,
            opacity: settings.opacity,
            fade_first_step: settings.fade.first_step,
            fade_steps: settings.fade.total_steps,
            fade_step_ms: settings.fade.step_interval.as_millis() as u64,
            fade_ms: settings.fade.duration.as_millis() as u64,
            reveal_delay_ms: settings.reveal_delay.as_millis() as u64,
            scroll_step: settings.scroll_step,
            wrap_padding: settings.wrap_padding,
            position_file: None,
        }
    }
}

impl OverlayConfig {
    pub fn settings(&self) -> OverlaySettings {
        OverlaySettings {
            size: SizePolicy {
                width_ratio: self.width_ratio,
                height_ratio: self.height_ratio,
                min_width: self.min_width,
                max_width: self.max_width.max(self.min_width),
                min_height: self.min_height,
                max_height: self.max_height.max(self.min_height),
            },
            fade: FadePlan {
                first_step: self.fade_first_step,
                total_steps: self.fade_steps,
                step_interval: Duration::from_millis(self.fade_step_ms),
                duration: Duration::from_millis(self.fade_ms),
            },
            opacity: self.opacity.clamp(0.0, 1.0),
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            scroll_step: self.scroll_step,
            wrap_padding: self.wrap_padding,
        }
    }

    pub fn margins(&self) -> Margins {
        Margins::new(self.margin_right, self.margin_bottom)
    }
}

impl Config {
    /// Load from the default path, creating a commented default file if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load from `path`. Missing fields use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/newsticker/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsticker").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ConfigError::Io { path, source }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        fs::write(path, Self::default_config_content()).map_err(io_err(path))
    }

    fn default_config_content() -> String {
        let feeds: String = DEFAULT_FEEDS
            .iter()
            .map(|url| format!("    \"{}\",\n", url))
            .collect();

        format!(
            r##"# newsticker configuration
#
# Colors can be named (Black, Red, DarkGray, LightBlue, White, ...) or hex
# ("#RRGGBB" / "#RGB"). Keys can be single characters, special keys
# (Enter, Esc, Up, Down, PageUp, PageDown, Space, F1-F12, Plus) or use
# modifiers ("Ctrl+c", "Alt+Enter").

# Feeds shown in the ticker, queried in this order
feeds = [
{feeds}]

[fetch]
timeout_secs = {timeout}
# Feeds fetched concurrently
workers = {workers}

[overlay]
# Window size as a fraction of the terminal, bounded in cells
width_ratio = 0.36
height_ratio = 0.35
min_width = 40
max_width = 90
min_height = 12
max_height = 30

# Default placement offset from the bottom-right corner
margin_right = 2
margin_bottom = 1

# Resting opacity and crossfade ramp (steps fade_first_step..fade_steps,
# fade_step_ms apart, finished after fade_ms)
opacity = 0.97
fade_first_step = 7
fade_steps = 14
fade_step_ms = 14
fade_ms = 210
reveal_delay_ms = 500

# Body lines per wheel notch
scroll_step = 3
wrap_padding = 4

# Where the window position is remembered
# position_file = "/home/me/.config/newsticker/position.json"

[colors]
background = "#232323"
border = "#444444"
title = "#FFFFFF"
source = "#BBBBBB"
body = "#ECECEC"
link = "#40A9FF"
arrow = "#666666"

[keybindings]
next = ["Down", "j", "Space"]
dismiss = ["Esc", "q", "Ctrl+c"]
open_link = ["o", "Enter"]
scroll_up = ["PageUp", "u"]
scroll_down = ["PageDown", "d"]
grow = ["+", "="]
shrink = ["-"]
"##,
            timeout = DEFAULT_TIMEOUT_SECS,
            workers = DEFAULT_WORKERS,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.feeds.len(), DEFAULT_FEEDS.len());
        assert_eq!(config.colors.background, Color::Rgb(0x23, 0x23, 0x23));
        assert_eq!(config.keybindings.dismiss, vec!["Esc", "q", "Ctrl+c"]);
        assert_eq!(config.overlay.settings(), OverlaySettings::default());
        assert!(config.keybindings.invalid_bindings().is_empty());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.feeds.len(), DEFAULT_FEEDS.len());
        assert_eq!(config.fetch.workers, DEFAULT_WORKERS);
        assert_eq!(config.overlay.settings(), OverlaySettings::default());
        assert_eq!(config.overlay.margins(), Margins::new(2, 1));
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
feeds = ["https://example.com/rss"]

[overlay]
opacity = 1.5
max_width = 10

[colors]
title = "Yellow"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.feeds, vec!["https://example.com/rss"]);
        assert_eq!(config.colors.title, Color::Yellow);
        assert_eq!(config.colors.body, Color::Rgb(0xec, 0xec, 0xec));

        let settings = config.overlay.settings();
        assert_eq!(settings.opacity, 1.0);
        assert_eq!(settings.size.max_width, settings.size.min_width);
    }

    #[test]
    fn test_invalid_color_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[colors]\ntitle = \"chartreuse-ish\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.feeds.len(), DEFAULT_FEEDS.len());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.feeds, config.feeds);
    }
}
