// Configuration file loaders

use crate::{ConfigError, Result, SECTION_SEPARATOR};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Parses a configuration document into flat `section:key` entries.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the format from the file extension.
    pub fn auto(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError(format!("No file extension: {}", path)))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn load_file(&self, path: &str) -> Result<HashMap<String, Value>> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<HashMap<String, Value>> {
        let document = match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
            FileFormat::Toml => {
                let table: toml::Table = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
                serde_json::to_value(table)
                    .map_err(|e| ConfigError::SerializationError(e.to_string()))?
            }
            FileFormat::Env => Self::parse_env(content),
        };

        let mut entries = HashMap::new();
        flatten(None, document, &mut entries);
        Ok(entries)
    }

    fn parse_env(content: &str) -> Value {
        let mut map = serde_json::Map::new();

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                map.insert(
                    key.trim().replace("__", SECTION_SEPARATOR),
                    Value::String(value.to_string()),
                );
            }
        }

        Value::Object(map)
    }
}

/// Flatten nested objects and arrays into `parent:child` / `parent:0` keys.
fn flatten(prefix: Option<String>, value: Value, out: &mut HashMap<String, Value>) {
    let join = |key: &str| match &prefix {
        Some(p) => format!("{}{}{}", p, SECTION_SEPARATOR, key),
        None => key.to_string(),
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(Some(join(&key)), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.into_iter().enumerate() {
                flatten(Some(join(&index.to_string())), child, out);
            }
        }
        scalar => {
            if let Some(key) = prefix {
                out.insert(key.to_lowercase(), scalar);
            }
        }
    }
}
