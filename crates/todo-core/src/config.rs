use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "todo";
const DATA_FILE_NAME: &str = "todos.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data file used when neither `--file` nor `TODO_FILE` is given.
    #[serde(default)]
    pub default_file: Option<PathBuf>,

    /// Stands in for the system colour-scheme preference when no
    /// dark mode choice has been saved yet.
    #[serde(default)]
    pub prefer_dark: bool,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/todo/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("todo/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("todo\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or malformed files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| Self::from_toml(&content))
            .unwrap_or_default()
    }

    pub fn from_toml(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Resolve the data file: explicit argument first, then the configured
    /// default, then `<data dir>/todo/todos.json`.
    pub fn resolve_data_file(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| self.default_file.clone())
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join(DATA_FILE_NAME)))
    }
}
