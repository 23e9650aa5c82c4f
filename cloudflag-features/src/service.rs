//! LaunchDarkly-backed flag service.

use crate::client::default_factory;
use crate::lazy::LazyClient;
use crate::{
    ClientFactory, ClientState, EvaluationClient, FeatureFlag, FeatureFlagError, Result, Subject,
};
use cloudflag_config::ConfigSource;
use cloudflag_log::{SharedLogger, debug};
use std::fmt;
use std::sync::Arc;

/// Configuration entry holding the LaunchDarkly SDK key.
pub const SDK_KEY_CONFIG_NAME: &str = "LaunchDarklySdkKey";

/// Boolean feature flag lookups delegated to an evaluation client.
///
/// The client is either supplied up front or built from an SDK key on first
/// use. A failed build is logged and retried on the next lookup.
///
/// ```
/// use cloudflag_features::{FeatureFlag, FlagService, InMemoryClient};
/// use std::sync::Arc;
///
/// let client = Arc::new(InMemoryClient::offline().with_flag("new-ui", true));
/// let flags = FlagService::with_client(client, None);
///
/// assert_eq!(flags.get_feature_flag("new-ui", false), Ok(true));
/// ```
pub struct FlagService {
    client: LazyClient,
    sdk_key: Option<String>,
    factory: Arc<dyn ClientFactory>,
    logger: Option<SharedLogger>,
    subject: Subject,
}

impl FlagService {
    /// Wrap an existing client. The service never builds one of its own.
    pub fn with_client(client: Arc<dyn EvaluationClient>, logger: Option<SharedLogger>) -> Self {
        Self {
            client: LazyClient::ready(client),
            sdk_key: None,
            factory: default_factory(),
            logger,
            subject: Subject::current_process(),
        }
    }

    /// Service that builds its client from `sdk_key` on first use.
    pub fn new(sdk_key: impl Into<String>, logger: Option<SharedLogger>) -> Result<Self> {
        let sdk_key = sdk_key.into();
        if sdk_key.is_empty() {
            return Err(FeatureFlagError::InvalidArgument(
                "LaunchDarkly SDK key cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            client: LazyClient::empty(),
            sdk_key: Some(sdk_key),
            factory: default_factory(),
            logger,
            subject: Subject::current_process(),
        })
    }

    /// Read the SDK key from the `LaunchDarklySdkKey` configuration entry.
    pub fn from_config(config: &dyn ConfigSource, logger: SharedLogger) -> Result<Self> {
        let sdk_key = config
            .get_value(SDK_KEY_CONFIG_NAME)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                FeatureFlagError::InvalidArgument(format!(
                    "LaunchDarkly key cannot be resolved from configuration (looking for \"{}\")",
                    SDK_KEY_CONFIG_NAME
                ))
            })?;

        Self::new(sdk_key, Some(logger))
    }

    /// Replace the factory used for lazy client construction.
    pub fn with_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Evaluate flags for `subject` instead of the current process.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = subject;
        self
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn client_state(&self) -> ClientState {
        self.client.state()
    }

    /// The wrapped client, building it first if necessary.
    ///
    /// Returns `None` when building fails; the failure goes to the logger.
    pub fn client(&self) -> Option<Arc<dyn EvaluationClient>> {
        if let Some(client) = self.client.get() {
            return Some(client);
        }
        let sdk_key = self.sdk_key.as_deref()?;

        debug!("Creating LaunchDarkly client on first use");
        match self.client.get_or_try_init(|| self.factory.create(sdk_key)) {
            Ok(client) => Some(client),
            Err(err) => {
                debug!("LaunchDarkly client creation failed: {}", err);
                if let Some(logger) = &self.logger {
                    logger.error_with(
                        "Exception occurred when initialising LaunchDarkly client",
                        &err,
                    );
                }
                None
            }
        }
    }
}

impl FeatureFlag for FlagService {
    /// Rejects an empty `key` before the client is checked or built.
    fn get_feature_flag(&self, key: &str, default_value: bool) -> Result<bool> {
        if key.is_empty() {
            return Err(FeatureFlagError::InvalidArgument(
                "Feature flag key must be set".to_string(),
            ));
        }

        let client = self
            .client()
            .filter(|client| client.initialized())
            .ok_or_else(|| {
                FeatureFlagError::InvalidOperation(
                    "LaunchDarkly client is not initialized.".to_string(),
                )
            })?;

        let detail = client.bool_variation_detail(key, &self.subject, default_value);

        if let Some(error_kind) = detail.reason.error_kind() {
            if let Some(logger) = &self.logger {
                logger.error(&format!("Failed to get feature flag. Reason: {}", error_kind));
            }
            return Ok(default_value);
        }

        Ok(detail.value)
    }
}

impl fmt::Debug for FlagService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagService")
            .field("state", &self.client_state())
            .field("has_sdk_key", &self.sdk_key.is_some())
            .field("has_logger", &self.logger.is_some())
            .field("subject", &self.subject.key())
            .finish()
    }
}
