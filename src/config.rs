use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::logger;

pub const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Overrides `<config dir>/local.db`.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// How long status messages stay in the footer.
    #[serde(default = "default_status_seconds")]
    pub status_seconds: u64,
}

fn default_status_seconds() -> u64 {
    2
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            status_seconds: default_status_seconds(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub accent: Color,
    pub muted: Color,
    pub card_text: Color,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeConfig {
    pub light: Palette,
    pub dark: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light: Palette {
                background: Color::Reset,
                foreground: Color::Rgb(32, 33, 36),
                border: Color::Rgb(218, 220, 224),
                accent: Color::Rgb(251, 188, 4),
                muted: Color::Rgb(95, 99, 104),
                card_text: Color::Rgb(32, 33, 36),
            },
            dark: Palette {
                background: Color::Rgb(32, 33, 36),
                foreground: Color::Rgb(232, 234, 237),
                border: Color::Rgb(95, 99, 104),
                accent: Color::Rgb(251, 188, 4),
                muted: Color::Rgb(154, 160, 166),
                card_text: Color::Rgb(32, 33, 36),
            },
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self, dark_mode: bool) -> &Palette {
        if dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}

impl AppConfig {
    pub fn db_path(&self) -> PathBuf {
        self.general
            .db_path
            .clone()
            .unwrap_or_else(|| get_config_dir().join("local.db"))
    }
}

/// `$JOTTER_HOME`, or `~/.jotter`.
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("JOTTER_HOME") {
        return PathBuf::from(dir);
    }
    let mut path = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    path.push(".jotter");
    path
}

/// Reads `config.toml`, writing the defaults on first run. A file that does
/// not parse is moved aside to `config.toml.bak` and the defaults are used.
pub fn load_config() -> AppConfig {
    let dir = get_config_dir();
    if let Err(e) = fs::create_dir_all(&dir) {
        logger::warn(&format!("load_config: cannot create {:?}: {}", dir, e));
    }
    let path = dir.join("config.toml");

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let config = AppConfig::default();
            write_default(&path, &config);
            return config;
        }
        Err(e) => {
            logger::warn(&format!("load_config: read failed: {}", e));
            eprintln!("Could not read {:?} ({}); using defaults.", path, e);
            return AppConfig::default();
        }
    };

    match parse_config(&content) {
        Ok(config) => config,
        Err(e) => {
            logger::warn(&format!("load_config: invalid config.toml: {}", e));
            let backup = path.with_extension("toml.bak");
            match fs::rename(&path, &backup) {
                Ok(()) => eprintln!("Invalid config.toml moved to {:?}; using defaults.", backup),
                Err(rename_err) => {
                    logger::error(&format!("load_config: backup failed: {}", rename_err));
                    eprintln!("Invalid config.toml ({}); using defaults.", e);
                }
            }
            AppConfig::default()
        }
    }
}

fn write_default(path: &Path, config: &AppConfig) {
    let text = match toml::to_string_pretty(config) {
        Ok(text) => text,
        Err(e) => {
            logger::warn(&format!("load_config: cannot serialize defaults: {}", e));
            return;
        }
    };
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let written = options
        .open(path)
        .and_then(|mut file| file.write_all(text.as_bytes()));
    match written {
        Ok(()) => logger::info(&format!("load_config: wrote defaults to {:?}", path)),
        Err(e) => logger::warn(&format!("load_config: cannot write defaults: {}", e)),
    }
}

fn parse_config(content: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(content)
}
