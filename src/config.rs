/// Application settings
///
/// Resolved once at startup, in order:
/// 1. Built-in defaults
/// 2. The config file, if present:
///    - Linux: ~/.config/pawscan/config.toml
///    - macOS: ~/Library/Application Support/pawscan/config.toml
///    - Windows: %APPDATA%\pawscan\config.toml
/// 3. `PAWSCAN_*` environment variables
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Flask backend's development server
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1500);

pub const ENV_BACKEND: &str = "PAWSCAN_BACKEND";
pub const ENV_ENDPOINT: &str = "PAWSCAN_ENDPOINT";
pub const ENV_SIMULATED_DELAY_MS: &str = "PAWSCAN_SIMULATED_DELAY_MS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which classifier answers analysis requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Remote,
    Simulated,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Backend::Remote),
            "simulated" => Ok(Backend::Simulated),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_BACKEND,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: Backend,
    /// Full URL of the prediction endpoint
    pub endpoint: String,
    /// How long the simulated classifier "thinks"
    pub simulated_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::Remote,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            simulated_delay: DEFAULT_SIMULATED_DELAY,
        }
    }
}

/// On-disk shape of config.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    backend: Option<Backend>,
    endpoint: Option<String>,
    simulated_delay_ms: Option<u64>,
}

impl Settings {
    /// Load settings from the default config path and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let contents = match config_path() {
            Some(path) => read_config_file(&path)?,
            None => None,
        };

        Self::resolve(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Merge defaults, file contents and environment lookups, then validate.
    pub fn resolve(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(contents) = file {
            let file: FileSettings = toml::from_str(contents)?;
            if let Some(backend) = file.backend {
                settings.backend = backend;
            }
            if let Some(endpoint) = file.endpoint {
                settings.endpoint = endpoint;
            }
            if let Some(ms) = file.simulated_delay_ms {
                settings.simulated_delay = Duration::from_millis(ms);
            }
        }

        if let Some(value) = env(ENV_BACKEND) {
            settings.backend = value.parse()?;
        }
        if let Some(value) = env(ENV_ENDPOINT) {
            settings.endpoint = value;
        }
        if let Some(value) = env(ENV_SIMULATED_DELAY_MS) {
            let ms = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_SIMULATED_DELAY_MS,
                value: value.clone(),
            })?;
            settings.simulated_delay = Duration::from_millis(ms);
        }

        validate_endpoint(&settings.endpoint)?;
        Ok(settings)
    }
}

/// Get the path where the config file is expected
pub fn config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("pawscan");
    path.push("config.toml");
    Some(path)
}

/// Read a config file, treating a missing file as no config
pub fn read_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
        value: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::InvalidEndpoint {
            value: endpoint.to_string(),
            reason: format!("unsupported scheme {}", scheme),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(None, no_env).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.backend, Backend::Remote);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = r#"
            backend = "simulated"
            endpoint = "https://vet.example.com/predict"
            simulated_delay_ms = 250
        "#;
        let settings = Settings::resolve(Some(file), no_env).unwrap();

        assert_eq!(settings.backend, Backend::Simulated);
        assert_eq!(settings.endpoint, "https://vet.example.com/predict");
        assert_eq!(settings.simulated_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (ENV_BACKEND, "Remote"),
            (ENV_ENDPOINT, "http://10.0.0.5:8080/predict"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::resolve(Some(r#"backend = "simulated""#), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(settings.backend, Backend::Remote);
        assert_eq!(settings.endpoint, "http://10.0.0.5:8080/predict");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Settings::resolve(Some("backend = \"quantum\""), no_env),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::resolve(Some("colour = \"blue\""), no_env),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::resolve(Some("endpoint = \"not a url\""), no_env),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Settings::resolve(Some("endpoint = \"ftp://host/predict\""), no_env),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Settings::resolve(None, |key| (key == ENV_SIMULATED_DELAY_MS).then(|| "soon".to_string())),
            Err(ConfigError::InvalidValue { key: ENV_SIMULATED_DELAY_MS, .. })
        ));
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "simulated_delay_ms = 10\n").unwrap();

        let contents = read_config_file(&path).unwrap();
        let settings = Settings::resolve(contents.as_deref(), no_env).unwrap();
        assert_eq!(settings.simulated_delay, Duration::from_millis(10));

        assert!(read_config_file(&dir.path().join("absent.toml")).unwrap().is_none());
    }
}
