use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::DistributionParams;

/// Default filename used to persist configuration within the data directory.
const CONFIG_FILENAME: &str = "config.json";

pub const ENV_DATA_DIR: &str = "SURVEY_DATA_DIR";
pub const ENV_SERVICE_HOST: &str = "SURVEY_SERVICE_HOST";
pub const ENV_SERVICE_PORT: &str = "SURVEY_SERVICE_PORT";
pub const ENV_LOG: &str = "SURVEY_LOG";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3300;

/// Process-level settings resolved from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl ServiceSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup(ENV_SERVICE_HOST)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(ENV_SERVICE_PORT) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SERVICE_PORT} is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let data_dir = match lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            host,
            port,
            data_dir,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("dev", "survey", "SurveyService")
        .ok_or_else(|| anyhow!("unable to determine OS data dir"))?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Complete persisted configuration payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Curve parameters used when a request leaves them out.
    #[serde(default)]
    pub distribution: DistributionParams,
}

/// Thread-safe manager responsible for loading and persisting `AppConfig`.
pub struct ConfigManager {
    path: PathBuf,
    state: RwLock<AppConfig>,
}

impl ConfigManager {
    /// Create a manager rooted at `data_dir`. The JSON file will be located at
    /// `<data_dir>/config.json`. A missing or malformed file yields defaults;
    /// any other read failure is returned.
    pub fn load(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = data_dir.as_ref().join(CONFIG_FILENAME);
        let config = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<AppConfig>(&bytes).unwrap_or_else(|err| {
                warn!(
                    path = %path.display(),
                    "ignoring malformed config, using defaults: {err}"
                );
                AppConfig::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => AppConfig::default(),
            Err(err) => return Err(err),
        };

        Ok(Self {
            path,
            state: RwLock::new(config),
        })
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> AppConfig {
        self.state.read().clone()
    }

    pub fn distribution_defaults(&self) -> DistributionParams {
        self.state.read().distribution
    }

    /// Update the default curve parameters and persist to disk.
    pub fn set_distribution(&self, params: DistributionParams) -> std::io::Result<AppConfig> {
        {
            let mut guard = self.state.write();
            guard.distribution = params;
            self.persist_locked(&guard)?;
        }
        Ok(self.current())
    }

    /// Ensure the backing directory exists and write the JSON payload.
    fn persist_locked(&self, config: &AppConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(config)?;
        fs::write(&self.path, payload)
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
    fn settings_read_overrides() {
        let settings = ServiceSettings::from_lookup(lookup_from(&[
            (ENV_SERVICE_HOST, "0.0.0.0"),
            (ENV_SERVICE_PORT, "8080"),
            (ENV_DATA_DIR, "/tmp/survey-data"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/survey-data"));
    }

    #[test]
    fn settings_default_host_and_port() {
        let settings =
            ServiceSettings::from_lookup(lookup_from(&[(ENV_DATA_DIR, "/tmp/x")])).unwrap();
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn settings_reject_bad_port() {
        let result = ServiceSettings::from_lookup(lookup_from(&[
            (ENV_SERVICE_PORT, "not-a-port"),
            (ENV_DATA_DIR, "/tmp/x"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::load(dir.path()).unwrap();
        assert_eq!(manager.distribution_defaults(), DistributionParams::default());
    }

    #[test]
    fn config_defaults_when_file_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{{{").unwrap();
        let manager = ConfigManager::load(dir.path()).unwrap();
        assert_eq!(manager.distribution_defaults(), DistributionParams::default());
    }

    #[test]
    fn config_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(ConfigManager::load(dir.path()).is_err());
    }

    #[test]
    fn set_distribution_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::load(dir.path()).unwrap();
        let params = DistributionParams::new(35.0, 4.0, 21);

        manager.set_distribution(params).unwrap();

        let reloaded = ConfigManager::load(dir.path()).unwrap();
        assert_eq!(reloaded.current().distribution, params);
    }
}
