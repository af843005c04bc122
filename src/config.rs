use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "create-starter";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// How templates are fetched
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GitConfig {
    pub program: String,
    /// Prefix prepended to a template's `owner/repo` reference
    pub host: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            host: "https://github.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// How long the error line stays up before the process exits
    pub exit_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { exit_delay_ms: 100 }
    }
}

impl UiConfig {
    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `create_starter=debug`
    pub level: String,
    /// Defaults to the user cache directory
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

pub fn load_config() -> Result<Config> {
    // 1. Check local create-starter.yaml
    let local_config = Path::new("create-starter.yaml");
    if local_config.exists() {
        return read_config(local_config);
    }

    // 2. Check ~/.config/create-starter/config.yaml
    if let Some(config_path) = get_config_path() {
        if config_path.exists() {
            return read_config(&config_path);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<Config> {
    // An empty file deserializes to unit, not to an empty mapping
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml_ng::from_str(contents)?)
}

/// Get the user config file path
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.yaml"))
}

/// Default log file location
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_NAME).join(format!("{APP_NAME}.log")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("git:\n  host: https://gitlab.com\nui:\n  exit_delay_ms: 250\n")
            .unwrap();
        assert_eq!(config.git.host, "https://gitlab.com");
        assert_eq!(config.git.program, "git");
        assert_eq!(config.ui.exit_delay(), Duration::from_millis(250));
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_log_file_override() {
        let config = parse_config("log:\n  level: debug\n  file: /tmp/starter.log\n").unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/starter.log")));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_config("ui:\n  exit_delay_ms: soon\n").is_err());
    }

    #[test]
    fn test_read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "git:\n  program: /usr/bin/git\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.git.program, "/usr/bin/git");
    }
}
