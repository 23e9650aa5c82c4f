// Environment variable loading

use crate::{ConfigError, Result, SECTION_SEPARATOR};
use std::collections::HashMap;
use std::env;

/// Reads configuration entries from process environment variables.
///
/// A double underscore in a variable name maps to the `:` section
/// separator, so `FEATUREFLAGS__LAUNCHDARKLYSDKKEY` becomes
/// `featureflags:launchdarklysdkkey`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// The prefix without trailing underscores. Variables must continue it
    /// with `_`, so `MYAPP` matches `MYAPP_KEY` but not `MYAPPX_KEY`.
    fn prefix(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|prefix| prefix.trim_end_matches('_'))
            .filter(|prefix| !prefix.is_empty())
    }

    /// Collect every matching variable, keyed by normalized name.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut entries = HashMap::new();

        for (name, value) in vars {
            let name = match self.prefix() {
                Some(prefix) => match name.strip_prefix(prefix) {
                    Some(rest) if rest.starts_with('_') => rest.trim_start_matches('_').to_string(),
                    _ => continue,
                },
                None => name,
            };

            if name.is_empty() {
                continue;
            }
            entries.insert(Self::key_for(&name), value);
        }

        entries
    }

    /// Normalized configuration key for an environment variable name.
    pub fn key_for(name: &str) -> String {
        name.replace("__", SECTION_SEPARATOR).to_lowercase()
    }

    /// Read a single variable, applying the prefix and upper-casing the name.
    pub fn load_var(&self, key: &str) -> Result<String> {
        let name = match self.prefix() {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&name).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Iterator<Item = (String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_collect_without_prefix_normalizes_names() {
        let loader = EnvLoader::default();
        let entries = loader.collect(vars(&[
            ("LaunchDarklySdkKey", "sdk-1"),
            ("FEATUREFLAGS__TIMEOUT", "5"),
        ]));

        assert_eq!(entries.get("launchdarklysdkkey").map(String::as_str), Some("sdk-1"));
        assert_eq!(entries.get("featureflags:timeout").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_collect_with_prefix_skips_other_vars() {
        let loader = EnvLoader::new(Some("MYAPP".to_string()));
        let entries = loader.collect(vars(&[
            ("MYAPP_LAUNCHDARKLYSDKKEY", "sdk-2"),
            ("OTHER_VALUE", "x"),
            ("MYAPP", "bare"),
        ]));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("launchdarklysdkkey").map(String::as_str), Some("sdk-2"));
    }

    #[test]
    fn test_prefix_requires_separator() {
        let loader = EnvLoader::new(Some("MYAPP".to_string()));
        let entries = loader.collect(vars(&[("MYAPPX_FOO", "wrong"), ("MYAPP_FOO", "right")]));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("foo").map(String::as_str), Some("right"));
        assert!(!entries.contains_key("x_foo"));
    }

    #[test]
    fn test_prefix_with_trailing_underscore() {
        let loader = EnvLoader::new(Some("MYAPP_".to_string()));
        let entries = loader.collect(vars(&[("MYAPP_FOO", "1"), ("MYAPPFOO", "2")]));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("foo").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_load_var_or_default() {
        let loader = EnvLoader::default();
        assert_eq!(loader.load_var_or("CLOUDFLAG_NONEXISTENT_12345", "fallback"), "fallback");
    }

    #[test]
    fn test_load_var_missing_with_prefix() {
        let loader = EnvLoader::new(Some("CLOUDFLAG_TEST".to_string()));
        assert!(loader.load_var("MISSING_67890").is_err());
    }
}
