// src/config.rs
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{NeuroError, Result};

pub const DEFAULT_API_BASE: &str = "https://neuroview-backend.onrender.com/api/auto";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where the prediction backend lives and how long to wait for it.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// The single resource URL all three operations target.
    #[serde(default = "default_api_base")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// High-level application configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    /// Uses the TOML file named by `NEUROVIEW_CONFIG` when set, otherwise
    /// environment variables.
    pub fn load() -> Result<Self> {
        match std::env::var("NEUROVIEW_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Self::from_env(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let base_url = non_blank("NEUROVIEW_API_BASE").unwrap_or_else(default_api_base);

        let timeout_secs = match non_blank("NEUROVIEW_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                NeuroError::Config(format!(
                    "NEUROVIEW_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = AppConfig {
            api: ApiConfig {
                base_url,
                timeout_secs,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| {
            NeuroError::Config(format!("invalid API base URL {:?}: {e}", self.api.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NeuroError::Config(format!(
                "API base URL must be http or https, got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(NeuroError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.api.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("NEUROVIEW_API_BASE", "http://127.0.0.1:9000/api/auto"),
            ("NEUROVIEW_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api/auto");
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("NEUROVIEW_API_BASE", "  "),
            ("NEUROVIEW_TIMEOUT_SECS", ""),
        ]))
        .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let bad_timeout =
            AppConfig::from_lookup(lookup_from(&[("NEUROVIEW_TIMEOUT_SECS", "soon")]));
        assert!(matches!(bad_timeout, Err(NeuroError::Config(_))));

        let bad_url = AppConfig::from_lookup(lookup_from(&[("NEUROVIEW_API_BASE", "not a url")]));
        assert!(matches!(bad_url, Err(NeuroError::Config(_))));
    }

    #[test]
    fn parses_toml() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://staging.example.org/api/auto"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://staging.example.org/api/auto");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);

        assert!(matches!(
            AppConfig::from_toml("[api]\ntimeout_secs = \"x\""),
            Err(NeuroError::TomlParse(_))
        ));
    }
}
