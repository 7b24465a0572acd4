//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5730,
        }
    }
}

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. MENTORLINK_DATA environment variable
/// 3. TOML config file (`data_dir` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_dir(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("MENTORLINK_DATA") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config) = load_config_value() {
        if let Some(data_dir) = config.get("data_dir").and_then(|v| v.as_str()) {
            return PathBuf::from(data_dir);
        }
    }

    // Priority 4: OS-dependent compiled default
    default_data_dir()
}

/// Load server host/port from the config file's `[server]` table,
/// falling back to defaults for anything missing.
pub fn load_server_config() -> ServerConfig {
    let defaults = ServerConfig::default();

    let Ok(config) = load_config_value() else {
        return defaults;
    };
    let Some(server) = config.get("server") else {
        return defaults;
    };

    let host = server
        .get("host")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or(defaults.host);
    let port = server
        .get("port")
        .and_then(|v| v.as_integer())
        .and_then(|p| u16::try_from(p).ok())
        .unwrap_or(defaults.port);

    ServerConfig { host, port }
}

/// Path of the SQLite database inside the data folder
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("mentorlink.db")
}

fn load_config_value() -> Result<toml::Value> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Get configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/mentorlink/config.toml first, then /etc/mentorlink/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("mentorlink").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/mentorlink/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("mentorlink").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// OS-dependent default data folder path
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mentorlink"))
        .unwrap_or_else(|| PathBuf::from("./mentorlink_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_takes_priority() {
        let dir = resolve_data_dir(Some("/tmp/mentorlink-test"));
        assert_eq!(dir, PathBuf::from("/tmp/mentorlink-test"));
    }

    #[test]
    fn database_path_joins_data_dir() {
        let path = database_path(Path::new("/var/lib/mentorlink"));
        assert_eq!(path, PathBuf::from("/var/lib/mentorlink/mentorlink.db"));
    }

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5730);
    }
}
