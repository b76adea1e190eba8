use crate::errors::{AppError, AppResult};
use crate::models::view_mode::ViewMode;
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the configuration directory (used by the integration tests).
pub const CONFIG_DIR_ENV: &str = "RTIMELINE_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the local storage snapshot and the audit log.
    pub database: String,
    /// Directory where named save points are written.
    pub save_points_dir: String,
    /// View mode of a brand-new session.
    pub default_view: ViewMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            save_points_dir: Self::save_points_default().to_string_lossy().to_string(),
            default_view: ViewMode::Domino,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV)
            && !dir.is_empty()
        {
            return PathBuf::from(dir);
        }
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimeline")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtimeline")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeline.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeline.sqlite")
    }

    pub fn save_points_default() -> PathBuf {
        Self::config_dir().join("save_points")
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| AppError::ConfigSave)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Create the configuration directory and file plus the save-point
    /// directory. A relative `database` is placed inside the config dir.
    pub fn init_all(database: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut cfg = Self::default();
        if let Some(name) = database {
            let p = Path::new(&name);
            let db_path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            };
            cfg.database = db_path.to_string_lossy().to_string();
        }

        if !is_test {
            cfg.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        fs::create_dir_all(&cfg.save_points_dir)?;
        Ok(cfg)
    }
}
