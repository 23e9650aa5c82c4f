//! Configuration sources for cloudflag.
//!
//! Keys are case-insensitive and nested sections are addressed with `:`
//! (`FeatureFlags:LaunchDarklySdkKey`). Values can come from environment
//! variables, `.env` files and JSON/TOML files, layered in load order.
//!
//! ```
//! use cloudflag_config::{ConfigManager, ConfigSource};
//!
//! let config = ConfigManager::new();
//! config.set("LaunchDarklySdkKey", "sdk-123").unwrap();
//!
//! assert_eq!(config.get_value("launchdarklysdkkey").as_deref(), Some("sdk-123"));
//! ```

pub mod builder;
pub mod env;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use cloudflag_log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Separator between configuration sections.
pub const SECTION_SEPARATOR: &str = ":";

/// Read access to string configuration entries.
pub trait ConfigSource: Send + Sync {
    /// Value stored under `key`, or `None` when the entry is absent.
    fn get_value(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get_value(&self, key: &str) -> Option<String> {
        self.get(key).cloned().or_else(|| {
            self.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.clone())
        })
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Arc<T> {
    fn get_value(&self, key: &str) -> Option<String> {
        (**self).get_value(key)
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

/// Layered, thread-safe configuration store.
#[derive(Clone, Default)]
pub struct ConfigManager {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only environment variables starting with `prefix` are loaded.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            entries: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Value>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn load_env(&self) -> Result<()> {
        let vars = EnvLoader::new(self.env_prefix.clone()).load()?;
        debug!("Loaded {} configuration entries from environment", vars.len());

        let mut entries = self.write();
        for (key, value) in vars {
            entries.insert(key, Value::String(value));
        }
        Ok(())
    }

    /// Populate the process environment from a `.env` file, then load it.
    /// A missing default `.env` is not an error; a missing explicit path is.
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    pub fn load_file(&self, path: &str, format: FileFormat) -> Result<()> {
        let loaded = ConfigLoader::new(format).load_file(path)?;
        debug!("Loaded {} configuration entries from {}", loaded.len(), path);

        self.write().extend(loaded);
        Ok(())
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.write().insert(normalize(key), value);
        Ok(())
    }

    /// Typed lookup.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let entries = self.read();
        let value = entries
            .get(&normalize(key))
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.read().contains_key(&normalize(key))
    }

    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Copy every entry of `other` over this store.
    pub fn merge(&self, other: &ConfigManager) {
        let incoming = other.read().clone();
        self.write().extend(incoming);
    }
}

impl ConfigSource for ConfigManager {
    fn get_value(&self, key: &str) -> Option<String> {
        match self.read().get(&normalize(key))? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
