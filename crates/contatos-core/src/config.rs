//! Configuration management for contatos.
//!
//! Loads configuration from ${CONTATOS_HOME}/config.toml with sensible defaults.
//! Backend project settings (API key, project id, endpoints) may also come from
//! the environment; see [`Config::resolve`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default base URL for the Identity Toolkit (email/password sign-in).
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";
/// Default base URL for the Secure Token service (id token refresh).
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com";
/// Default base URL for the Firestore REST API.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
/// Collection the contact screen reads and writes.
pub const DEFAULT_COLLECTION: &str = "autenticador";

pub const API_KEY_ENV: &str = "CONTATOS_API_KEY";
pub const PROJECT_ID_ENV: &str = "CONTATOS_PROJECT_ID";
pub const AUTH_URL_ENV: &str = "CONTATOS_AUTH_URL";
pub const TOKEN_URL_ENV: &str = "CONTATOS_TOKEN_URL";
pub const FIRESTORE_URL_ENV: &str = "CONTATOS_FIRESTORE_URL";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for contatos configuration and data directories.
    //!
    //! CONTATOS_HOME resolution order:
    //! 1. CONTATOS_HOME environment variable (if set)
    //! 2. ~/.config/contatos (default)

    use std::path::PathBuf;

    /// Returns the contatos home directory.
    pub fn contatos_home() -> PathBuf {
        if let Ok(home) = std::env::var("CONTATOS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("contatos")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        contatos_home().join("config.toml")
    }

    /// Returns the directory holding the rolling log files.
    pub fn logs_dir() -> PathBuf {
        contatos_home().join("logs")
    }
}

/// Base URL overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub auth_url: Option<String>,
    pub token_url: Option<String>,
    pub firestore_url: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web API key of the backend project.
    pub api_key: Option<String>,

    /// Backend project id (addresses the document database).
    pub project_id: Option<String>,

    /// Collection holding contact documents.
    pub collection: String,

    /// Timeout for backend requests in seconds (0 disables).
    pub request_timeout_secs: u32,

    /// Base URL overrides.
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: None,
            collection: DEFAULT_COLLECTION.to_string(),
            request_timeout_secs: 0,
            endpoints: EndpointsConfig::default(),
        }
    }
}

/// Fully resolved backend settings, ready to build HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub api_key: String,
    pub project_id: String,
    pub collection: String,
    pub auth_url: String,
    pub token_url: String,
    pub firestore_url: String,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
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

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Resolves backend settings from the process environment and this config.
    ///
    /// # Errors
    /// Returns an error if the API key or project id is missing, or an
    /// endpoint override is not a valid URL.
    pub fn resolve(&self) -> Result<BackendSettings> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves backend settings using `env` as the environment lookup.
    ///
    /// Precedence for every value: env > config > default.
    pub fn resolve_with<F>(&self, env: F) -> Result<BackendSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = pick(env(API_KEY_ENV), self.api_key.as_deref()).with_context(|| {
            format!("No API key available. Set {API_KEY_ENV} or api_key in config.toml.")
        })?;
        let project_id =
            pick(env(PROJECT_ID_ENV), self.project_id.as_deref()).with_context(|| {
                format!("No project id available. Set {PROJECT_ID_ENV} or project_id in config.toml.")
            })?;

        let auth_url = resolve_url(
            env(AUTH_URL_ENV),
            self.endpoints.auth_url.as_deref(),
            DEFAULT_AUTH_URL,
            "auth",
        )?;
        let token_url = resolve_url(
            env(TOKEN_URL_ENV),
            self.endpoints.token_url.as_deref(),
            DEFAULT_TOKEN_URL,
            "token",
        )?;
        let firestore_url = resolve_url(
            env(FIRESTORE_URL_ENV),
            self.endpoints.firestore_url.as_deref(),
            DEFAULT_FIRESTORE_URL,
            "firestore",
        )?;

        let collection = match self.collection.trim() {
            "" => DEFAULT_COLLECTION.to_string(),
            name => name.to_string(),
        };

        Ok(BackendSettings {
            api_key,
            project_id,
            collection,
            auth_url,
            token_url,
            firestore_url,
            timeout: self.request_timeout(),
        })
    }
}

/// First non-empty (trimmed) value of env, then config.
fn pick(env_value: Option<String>, config_value: Option<&str>) -> Option<String> {
    env_value
        .as_deref()
        .into_iter()
        .chain(config_value)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn resolve_url(
    env_value: Option<String>,
    config_value: Option<&str>,
    default_url: &str,
    name: &str,
) -> Result<String> {
    let Some(candidate) = pick(env_value, config_value) else {
        return Ok(default_url.to_string());
    };
    url::Url::parse(&candidate).with_context(|| format!("Invalid {name} base URL: {candidate}"))?;
    Ok(candidate.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(config.collection, "autenticador");
        assert_eq!(config.api_key, None);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "project_id = \"agenda-123\"\n[endpoints]\nfirestore_url = \"http://localhost:8080\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.project_id.as_deref(), Some("agenda-123"));
        assert_eq!(config.collection, "autenticador");
        assert_eq!(
            config.endpoints.firestore_url.as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_init_creates_config_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("collection = \"autenticador\""));
        assert!(contents.contains("# api_key ="));

        // The template itself must parse back into defaults.
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_resolve_env_wins_over_config() {
        let config = Config {
            api_key: Some("from-config".to_string()),
            project_id: Some("project-config".to_string()),
            ..Default::default()
        };
        let settings = config
            .resolve_with(env_from(&[(API_KEY_ENV, "from-env")]))
            .unwrap();

        assert_eq!(settings.api_key, "from-env");
        assert_eq!(settings.project_id, "project-config");
        assert_eq!(settings.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(settings.firestore_url, DEFAULT_FIRESTORE_URL);
    }

    #[test]
    fn test_resolve_blank_values_fall_through() {
        let config = Config {
            api_key: Some("key".to_string()),
            project_id: Some("proj".to_string()),
            collection: "  ".to_string(),
            ..Default::default()
        };
        let settings = config
            .resolve_with(env_from(&[(API_KEY_ENV, "   ")]))
            .unwrap();

        assert_eq!(settings.api_key, "key");
        assert_eq!(settings.collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn test_resolve_missing_api_key_fails() {
        let config = Config {
            project_id: Some("proj".to_string()),
            ..Default::default()
        };
        let err = config.resolve_with(env_from(&[])).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_resolve_rejects_invalid_url() {
        let config = Config {
            api_key: Some("key".to_string()),
            project_id: Some("proj".to_string()),
            ..Default::default()
        };
        let err = config
            .resolve_with(env_from(&[(FIRESTORE_URL_ENV, "not a url")]))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid firestore base URL"));
    }

    #[test]
    fn test_resolve_trims_trailing_slash() {
        let config = Config {
            api_key: Some("key".to_string()),
            project_id: Some("proj".to_string()),
            ..Default::default()
        };
        let settings = config
            .resolve_with(env_from(&[(AUTH_URL_ENV, "http://127.0.0.1:9099/")]))
            .unwrap();
        assert_eq!(settings.auth_url, "http://127.0.0.1:9099");
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);

        let config = Config {
            request_timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }
}
