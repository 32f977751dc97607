//! Optional `lift.toml` settings.
//!
//! Precedence is command-line flags, then the file, then built-in defaults.

use std::path::{Path, PathBuf};

use lift_core::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lift.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: String,
    pub location: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: "toml".to_string(),
            location: ".lift".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub default_preset: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Keep the session between runs.
    pub cache_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreSettings::default(),
            default_preset: lift_data::DEFAULT_PRESET.to_string(),
            log_level: "warn".to_string(),
            log_file: None,
            cache_session: true,
        }
    }
}

/// Values given on the command line; `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<String>,
    pub store: Option<String>,
    pub preset: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub no_cache: bool,
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `explicit` if given (it must exist), otherwise `lift.toml` in
    /// the working directory if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "Loaded config file");
                Self::from_toml_str(&text, &path)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn apply_overrides(
        &mut self,
        overrides: &ConfigOverrides,
    ) {
        if let Some(backend) = &overrides.backend {
            self.store.backend = backend.clone();
        }
        if let Some(store) = &overrides.store {
            self.store.location = store.clone();
        }
        if let Some(preset) = &overrides.preset {
            self.default_preset = preset.clone();
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(file) = &overrides.log_file {
            self.log_file = Some(file.clone());
        }
        if overrides.no_cache {
            self.cache_session = false;
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.clone(),
            location: self.store.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_use_toml_store_in_working_directory() {
        let config = AppConfig::default();

        assert_eq!(config.store_config().backend, "toml");
        assert_eq!(config.store_config().location, ".lift");
        assert_eq!(config.default_preset, "dtc");
        assert!(config.cache_session);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let text = r#"
default_preset = "saas"

[store]
location = "/tmp/lift"
"#;

        let config = AppConfig::from_toml_str(text, Path::new("lift.toml")).expect("valid config");

        assert_eq!(config.default_preset, "saas");
        assert_eq!(config.store.location, "/tmp/lift");
        assert_eq!(config.store.backend, "toml");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_file_names_path() {
        let err = AppConfig::from_toml_str("store = 3", Path::new("conf/lift.toml"))
            .expect_err("store must be a table");

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("conf/lift.toml"));
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = AppConfig {
            log_level: "info".to_string(),
            ..AppConfig::default()
        };
        let overrides = ConfigOverrides {
            backend: Some("memory".to_string()),
            preset: Some("services".to_string()),
            no_cache: true,
            ..ConfigOverrides::default()
        };

        config.apply_overrides(&overrides);

        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.location, ".lift");
        assert_eq!(config.default_preset, "services");
        assert_eq!(config.log_level, "info");
        assert!(!config.cache_session);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here/lift.toml")))
            .expect_err("explicit file must exist");

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
