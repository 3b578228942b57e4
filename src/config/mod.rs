use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::router::PanelRef;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_url: "http://localhost:8080".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            timeout_secs: 5,
        }
    }
}

impl BootstrapConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    pub load_delay_ms: u64,
    /// Panels that always fail to load
    pub fail: Vec<String>,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 150,
            fail: Vec::new(),
        }
    }
}

impl PanelsConfig {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    /// Entries that do not name a panel are skipped with a warning.
    pub fn failing_panels(&self) -> Vec<PanelRef> {
        self.fail
            .iter()
            .filter_map(|name| {
                let panel = PanelRef::from_slug(name.trim());
                if panel.is_none() {
                    tracing::warn!(%name, "unknown panel in [panels].fail");
                }
                panel
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub initial_tab: String,
    pub tick_rate_ms: u64,
    pub bootstrap: BootstrapConfig,
    pub panels: PanelsConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_tab: "dashboard".to_string(),
            tick_rate_ms: 200,
            bootstrap: BootstrapConfig::default(),
            panels: PanelsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.clamp(16, 2_000))
    }
}

/// Load from the default location; anything missing falls back to defaults.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match parse(&content) {
        Ok(config) => config,
        Err(err) => {
            // Logging is not initialised yet when this runs from main
            eprintln!("ignoring malformed config {}: {err}", path.display());
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
            Config::default()
        }
    }
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CHAINVIEW_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("chainview").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("chainview").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "chainview", "chainview")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("chainview"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("chainview"));
    }
    directories::ProjectDirs::from("io", "chainview", "chainview")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn credentials_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("chainview.sqlite3"))
}

pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("chainview.log"))
}
