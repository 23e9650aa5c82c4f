//! Startup composition helpers.
//!
//! Build one flag service when the application starts and hand the
//! resulting [`SharedFeatureFlag`] to every component that needs it.
//!
//! ```
//! use cloudflag_features::compose;
//! use cloudflag_features::InMemoryClient;
//! use std::sync::Arc;
//!
//! let flags = compose::feature_flags_with_client(Arc::new(InMemoryClient::offline()), None);
//! let worker_flags = Arc::clone(&flags);
//! # let _ = worker_flags;
//! ```

use crate::{EvaluationClient, FlagService, Result, SharedFeatureFlag};
use cloudflag_config::ConfigSource;
use cloudflag_log::SharedLogger;
use std::sync::Arc;

/// Service keyed from the `LaunchDarklySdkKey` configuration entry.
pub fn feature_flags_from_config(
    config: &dyn ConfigSource,
    logger: SharedLogger,
) -> Result<SharedFeatureFlag> {
    Ok(Arc::new(FlagService::from_config(config, logger)?))
}

/// Service that builds its LaunchDarkly client from `sdk_key` on first use.
pub fn feature_flags_with_key(
    sdk_key: &str,
    logger: Option<SharedLogger>,
) -> Result<SharedFeatureFlag> {
    Ok(Arc::new(FlagService::new(sdk_key, logger)?))
}

/// Service around a client the caller already built and configured.
pub fn feature_flags_with_client(
    client: Arc<dyn EvaluationClient>,
    logger: Option<SharedLogger>,
) -> SharedFeatureFlag {
    Arc::new(FlagService::with_client(client, logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureFlag, FeatureFlagError, InMemoryClient};
    use cloudflag_config::ConfigManager;
    use cloudflag_log::ConsoleLogger;

    #[test]
    fn test_from_config_requires_sdk_key() {
        let config = ConfigManager::new();
        config.set("NoSdkKey", "none").unwrap();

        let result = feature_flags_from_config(&config, Arc::new(ConsoleLogger::default()));
        assert!(matches!(result, Err(FeatureFlagError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_config_resolves() {
        let config = ConfigManager::new();
        config.set("LaunchDarklySdkKey", "sampleKey").unwrap();

        assert!(feature_flags_from_config(&config, Arc::new(ConsoleLogger::default())).is_ok());
    }

    #[test]
    fn test_with_key() {
        assert!(feature_flags_with_key("sdk-00000000-0000-0000-0000-000000000000", None).is_ok());
        assert!(feature_flags_with_key("", None).is_err());
    }

    #[test]
    fn test_with_client_is_shared() {
        let client = Arc::new(InMemoryClient::offline().with_flag("shared", true));
        let flags = feature_flags_with_client(client, None);
        let other = Arc::clone(&flags);

        assert_eq!(flags.get_feature_flag("shared", false), Ok(true));
        assert_eq!(other.is_enabled("shared"), Ok(true));
        assert_eq!(Arc::strong_count(&flags), 2);
    }
}
