//! Configuration storage
//!
//! Persisted as TOML under the platform config directory; the file location
//! can be overridden with the BEEPER_CLI_CONFIG environment variable.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::output::Format;

/// Environment variable that overrides the config file location.
const CONFIG_PATH_ENV: &str = "BEEPER_CLI_CONFIG";
/// Environment variable that overrides the stored auth token.
const TOKEN_ENV: &str = "BEEPER_TOKEN";

pub const DEFAULT_API_URL: &str = "http://localhost:39867";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_output_format() -> String {
    Format::Json.to_string()
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Beeper Desktop API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Default output format (json, text, markdown)
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// Bearer token attached to every request when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            output_format: default_output_format(),
            token: None,
        }
    }
}

impl Config {
    /// Config file path: BEEPER_CLI_CONFIG when set, else the platform
    /// config directory.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let proj_dirs = ProjectDirs::from("com", "beeper-cli", "beeper-cli")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from disk, falling back to defaults when the
    /// file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        // Restrictive permissions; the file may contain a token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }

    /// Output format from the stored name. An unrecognized value (say, a
    /// hand-edited typo) degrades to json rather than breaking every command.
    pub fn format(&self) -> Format {
        Format::parse_lossy(&self.output_format)
    }

    /// Auth token, with BEEPER_TOKEN taking precedence over the stored value.
    pub fn token(&self) -> Option<String> {
        env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.format(), Format::Json);
        assert!(cfg.token.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_url: "http://localhost:39868".to_string(),
            output_format: "markdown".to_string(),
            token: Some("secret".to_string()),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:39868");
        assert_eq!(loaded.format(), Format::Markdown);
        assert_eq!(loaded.token, Some("secret".to_string()));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://localhost:40000\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api_url, "http://localhost:40000");
        assert_eq!(cfg.output_format, "json");
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_bad_stored_format_degrades_to_json() {
        let cfg = Config {
            output_format: "ymal".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.format(), Format::Json);
    }

    #[cfg(unix)]
    #[test]
    fn test_config_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
