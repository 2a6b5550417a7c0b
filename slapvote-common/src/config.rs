//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the data root folder
pub const ROOT_FOLDER_ENV: &str = "SLAPVOTE_ROOT_FOLDER";

/// Environment variables carrying the catalog provider secrets
pub const CLIENT_ID_ENV: &str = "SLAPVOTE_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SLAPVOTE_CLIENT_SECRET";

/// Catalog provider application credentials
///
/// Both values are confidential and only ever read from the process
/// environment; the proxy exists so they never reach the browser client.
#[derive(Debug, Clone)]
pub struct CatalogCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl CatalogCredentials {
    /// Load credentials from the process environment
    ///
    /// Returns `None` when either secret is missing or empty. Absence is not
    /// a startup failure: the service runs, and each proxy call fails with a
    /// fixed error instead.
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var(CLIENT_ID_ENV).ok().filter(|v| !v.is_empty())?;
        let client_secret = std::env::var(CLIENT_SECRET_ENV)
            .ok()
            .filter(|v| !v.is_empty())?;
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Ensure the root folder exists and return the database path inside it
pub fn prepare_root_folder(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)
        .map_err(|e| Error::Config(format!("Cannot create root folder {:?}: {}", root, e)))?;
    Ok(root.join("slapvote.db"))
}

/// Locate the configuration file for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/slapvote/config.toml first, then /etc/slapvote/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("slapvote").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/slapvote/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("slapvote").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("slapvote"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/slapvote"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("slapvote"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/slapvote"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("slapvote"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\slapvote"))
    } else {
        PathBuf::from("./slapvote_data")
    }
}
