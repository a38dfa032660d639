//! Configuration management for artdesk.
//!
//! Loads configuration from ${ARTDESK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured API base URL.
pub const BASE_URL_ENV: &str = "ARTDESK_BASE_URL";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments from the template are kept while the user's values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    for (key, value) in source.iter() {
        if let toml_edit::Item::Value(v) = value {
            target[key] = toml_edit::Item::Value(v.clone());
        }
    }
}

pub mod paths {
    //! Path resolution for artdesk configuration and data files.
    //!
    //! ARTDESK_HOME resolution order:
    //! 1. ARTDESK_HOME environment variable (if set)
    //! 2. ~/.config/artdesk (default)

    use std::path::PathBuf;

    /// Returns the artdesk home directory.
    ///
    /// Checks ARTDESK_HOME env var first, falls back to ~/.config/artdesk.
    /// Without a resolvable home directory, `.artdesk` in the working
    /// directory is used.
    pub fn artdesk_home() -> PathBuf {
        if let Ok(home) = std::env::var("ARTDESK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".artdesk"),
            |h| h.join(".config").join("artdesk"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        artdesk_home().join("config.toml")
    }

    /// Returns the path to the persisted session (token) file.
    pub fn session_path() -> PathBuf {
        artdesk_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        artdesk_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the articles API (`/login` and `/articles` hang off it)
    pub base_url: String,

    /// Optional scheme prepended to the token in the Authorization header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_scheme: Option<String>,

    /// Log filter directive for the log file
    pub log_level: String,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/api";
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the base URL to send requests to.
    ///
    /// Resolution order: `ARTDESK_BASE_URL` env > config > default.
    /// Trailing slashes are dropped so endpoint paths can be appended.
    ///
    /// # Errors
    /// Returns an error if the winning value is not a valid URL.
    pub fn effective_base_url(&self) -> Result<String> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(env_url.as_deref(), Some(&self.base_url))
    }

    /// Saves only the base_url field to the default config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url(base_url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), base_url)
    }

    /// Saves only the base_url field to a specific config file path.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// If it exists, user values are merged into the latest template so
    /// comments survive the edit.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        validate_url(base_url)?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            auth_scheme: None,
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Resolves a base URL with precedence: env > config > default.
fn resolve_base_url(env_url: Option<&str>, config_url: Option<&str>) -> Result<String> {
    let chosen = [env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(Config::DEFAULT_BASE_URL);

    validate_url(chosen)?;
    Ok(chosen.trim_end_matches('/').to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert!(config.auth_scheme.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auth_scheme = \"Bearer\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.auth_scheme.as_deref(), Some("Bearer"));
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_base_url_precedence() {
        let url = resolve_base_url(Some("http://env:1/api/"), Some("http://cfg:2/api")).unwrap();
        assert_eq!(url, "http://env:1/api");

        let url = resolve_base_url(Some("  "), Some("http://cfg:2/api")).unwrap();
        assert_eq!(url, "http://cfg:2/api");

        let url = resolve_base_url(None, None).unwrap();
        assert_eq!(url, Config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolve_base_url_rejects_garbage() {
        let err = resolve_base_url(None, Some("not a url")).unwrap_err();
        assert!(err.to_string().contains("Invalid API base URL"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::init(&path).unwrap();
        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_save_base_url_preserves_other_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        Config::save_base_url_to(&path, "https://articles.example.com/api").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# artdesk configuration"));
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://articles.example.com/api");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_merge_keeps_template_comments_and_user_values() {
        let merged = merge_with_template(
            "base_url = \"http://articles.test:1/api\"\nauth_scheme = \"Bearer\"\n",
        )
        .unwrap();

        assert!(merged.contains("# Log filter"));
        let config: Config = toml::from_str(&merged).unwrap();
        assert_eq!(config.base_url, "http://articles.test:1/api");
        assert_eq!(config.auth_scheme.as_deref(), Some("Bearer"));
        assert_eq!(config.log_level, "info");
    }
}
