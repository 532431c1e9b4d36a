//! Configuration loading and root folder resolution
//!
//! The root folder holds everything the dashboard serves: the dataset files
//! (`runs.json` or `clips_metadata.json`), the extracted clip media under
//! `clips/`, and the optional `threads.toml` table override.
//!
//! Root folder resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `ECR_ROOT_FOLDER` environment variable (then `ECR_ROOT`)
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! Missing config files degrade to defaults with a warning, never
//! termination.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Error, Result};

/// Default HTTP port for the dashboard service
pub const DEFAULT_PORT: u16 = 5731;

/// Bootstrap configuration loaded from TOML
///
/// These settings cannot change during runtime; the service must restart to
/// pick up changes.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Root folder for dataset and clip media (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Remote clip dataset URL, fetched when no local dataset exists
    #[serde(default)]
    pub remote_clips_url: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: DEFAULT_PORT,
            remote_clips_url: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the platform config file, degrading to defaults when absent
    /// or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Platform config file location (`~/.config/ecr/config.toml`, with
/// `/etc/ecr/config.toml` as the Linux system-wide fallback)
fn config_file_path() -> Option<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        let user_config = dir.join("ecr").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/ecr/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    dirs::config_dir().map(|d| d.join("ecr").join("config.toml"))
}

/// Get OS-dependent default root folder path (`~/Videos/ecr`)
pub fn default_root_folder() -> PathBuf {
    dirs::video_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join("ecr"))
        .unwrap_or_else(|| PathBuf::from("./ecr_data"))
}

/// Resolve the root folder by priority order (see module docs)
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: environment variables
    for var in ["ECR_ROOT_FOLDER", "ECR_ROOT"] {
        if let Ok(path) = std::env::var(var) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    // Priority 4: compiled default
    default_root_folder()
}

/// Well-known paths inside a resolved root folder
#[derive(Debug, Clone)]
pub struct RootFolder {
    root: PathBuf,
}

impl RootFolder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Multi-run dataset archive
    pub fn runs_path(&self) -> PathBuf {
        self.root.join("runs.json")
    }

    /// Flat single-run dataset
    pub fn flat_clips_path(&self) -> PathBuf {
        self.root.join("clips_metadata.json")
    }

    /// Optional thread table override
    pub fn threads_path(&self) -> PathBuf {
        self.root.join("threads.toml")
    }

    /// Extracted clip media served to the browser
    pub fn clips_dir(&self) -> PathBuf {
        self.root.join("clips")
    }
}
