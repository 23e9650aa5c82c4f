// ConfigBuilder - ordered composition of configuration sources

use crate::{ConfigManager, FileFormat, Result};

/// Builds a [`ConfigManager`] from sources applied in a fixed order:
/// `.env` file, environment variables, then files in the order added.
/// Later sources override earlier ones.
pub struct ConfigBuilder {
    prefix: Option<String>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<String>,
    files: Vec<(String, FileFormat)>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            prefix: None,
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            files: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    pub fn load_dotenv(mut self, path: Option<String>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    pub fn add_file(mut self, path: impl Into<String>, format: FileFormat) -> Self {
        self.files.push((path.into(), format));
        self
    }

    pub fn build(self) -> Result<ConfigManager> {
        let manager = match self.prefix {
            Some(prefix) => ConfigManager::with_prefix(prefix),
            None => ConfigManager::new(),
        };

        if self.load_dotenv {
            manager.load_dotenv(self.dotenv_path.as_deref())?;
        } else if self.load_env {
            manager.load_env()?;
        }

        for (path, format) in &self.files {
            manager.load_file(path, *format)?;
        }

        Ok(manager)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
