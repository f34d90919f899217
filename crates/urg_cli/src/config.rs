//! Layered configuration for the `urgences` host.
//!
//! Sources, highest priority first:
//! 1. `URGENCES_*` environment variables (`__` separates sections, e.g. `URGENCES_STORE__PATH`)
//! 2. `./urgences.toml`
//! 3. `~/.config/urgences/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use urg_core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// SQLite file. Defaults to `urgences.sqlite` under the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolved_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let dir = dirs::data_dir().ok_or_else(|| {
            AppError::new(
                "CONFIG_DATA_DIR_MISSING",
                "No platform data directory; set store.path",
            )
        })?;
        Ok(dir.join("urgences").join("urgences.sqlite"))
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

const fn default_seed_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed the reference guides on start when the guide collection is empty.
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::figment().extract().map_err(|e| {
            AppError::new("CONFIG_LOAD_FAILED", "Failed to load configuration")
                .with_details(e.to_string())
        })
    }

    /// Same as [`AppConfig::load`] after reading a `.env` file from the current directory, if any.
    pub fn load_with_dotenv() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global) = dirs::config_dir().map(|p| p.join("urgences").join("config.toml")) {
            if global.exists() {
                figment = figment.merge(Toml::file(global));
            }
        }

        figment
            .merge(Toml::file("urgences.toml"))
            // URGENCES_LOG is the tracing filter, not a config section.
            .merge(Env::prefixed("URGENCES_").ignore(&["log"]).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.store.path, None);
        assert_eq!(config.log.level, "info");
        assert!(config.seed.enabled);
    }

    #[test]
    fn env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "urgences.toml",
                r#"
                [store]
                backend = "memory"
                path = "from-toml.sqlite"

                [log]
                level = "debug"
                "#,
            )?;
            jail.set_env("URGENCES_STORE__PATH", "from-env.sqlite");
            jail.set_env("URGENCES_SEED__ENABLED", "false");
            jail.set_env("URGENCES_LOG", "trace");

            let config = AppConfig::load().expect("config");
            assert_eq!(config.store.backend, StoreBackend::Memory);
            assert_eq!(config.store.path, Some(PathBuf::from("from-env.sqlite")));
            assert_eq!(config.log.level, "debug");
            assert!(!config.seed.enabled);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_wins_over_data_dir() {
        let store = StoreConfig {
            backend: StoreBackend::Sqlite,
            path: Some(PathBuf::from("/tmp/x.sqlite")),
        };
        assert_eq!(store.resolved_path().unwrap(), PathBuf::from("/tmp/x.sqlite"));
    }
}
