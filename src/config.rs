use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Foreground color name for highlighted search matches
    pub match_fg: String,

    /// Background color name for highlighted search matches
    pub match_bg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Field delimiter used when the -d flag is absent
    pub delimiter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            match_fg: "black".to_string(),
            match_bg: "cyan".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
        }
    }
}

impl Config {
    /// Load from the platform config path, falling back to defaults when
    /// the file is absent or malformed. Never fatal: a broken config file
    /// should not keep the viewer from starting.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(target: "config", error = %e, path = %path.display(), "ignoring malformed config");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tabview").join("config.toml"))
    }
}

impl DisplayConfig {
    /// Style applied to match spans; everything else renders default.
    pub fn match_style(&self) -> Style {
        let fg = Color::from_str(&self.match_fg).unwrap_or(Color::Black);
        let bg = Color::from_str(&self.match_bg).unwrap_or(Color::Cyan);
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
    }
}
