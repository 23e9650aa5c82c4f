//! Evaluation subject.
//!
//! The identity a flag is evaluated for. Server-side services evaluate on
//! behalf of themselves, so the default subject is the running process.

use std::collections::HashMap;
use std::env;

/// Identity and attributes passed to the evaluation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    key: String,
    attributes: HashMap<String, String>,
}

impl Subject {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: HashMap::new(),
        }
    }

    /// Subject keyed by the current executable's name, falling back to this
    /// package's name when the executable path is unavailable.
    pub fn current_process() -> Self {
        let name = env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

        Self::new(name)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Subject {
    fn default() -> Self {
        Self::current_process()
    }
}
