//! The evaluation-client seam.
//!
//! [`FlagService`](crate::FlagService) never evaluates flags itself. It asks
//! an [`EvaluationClient`], created on demand by a [`ClientFactory`].

use crate::{ClientError, EvaluationDetail, Subject};
use std::sync::Arc;

/// Capability set of an external flag-evaluation client.
///
/// Implementations must be safe to call from many threads at once.
pub trait EvaluationClient: Send + Sync {
    /// Whether the client has received its flag data and can evaluate.
    fn initialized(&self) -> bool;

    /// Evaluate a boolean flag for `subject`. Clients report failures in
    /// the returned reason and serve `default_value`.
    fn bool_variation_detail(
        &self,
        flag_key: &str,
        subject: &Subject,
        default_value: bool,
    ) -> EvaluationDetail;
}

impl<T: EvaluationClient + ?Sized> EvaluationClient for Arc<T> {
    fn initialized(&self) -> bool {
        (**self).initialized()
    }

    fn bool_variation_detail(
        &self,
        flag_key: &str,
        subject: &Subject,
        default_value: bool,
    ) -> EvaluationDetail {
        (**self).bool_variation_detail(flag_key, subject, default_value)
    }
}

/// Builds an evaluation client from an SDK key.
pub trait ClientFactory: Send + Sync {
    fn create(&self, sdk_key: &str) -> Result<Arc<dyn EvaluationClient>, ClientError>;
}

impl<F> ClientFactory for F
where
    F: Fn(&str) -> Result<Arc<dyn EvaluationClient>, ClientError> + Send + Sync,
{
    fn create(&self, sdk_key: &str) -> Result<Arc<dyn EvaluationClient>, ClientError> {
        self(sdk_key)
    }
}

/// Factory used when the crate is built without a client implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableFactory;

impl ClientFactory for UnavailableFactory {
    fn create(&self, _sdk_key: &str) -> Result<Arc<dyn EvaluationClient>, ClientError> {
        Err(ClientError::Unavailable(
            "LaunchDarkly support is not compiled in (enable the `launchdarkly` feature)"
                .to_string(),
        ))
    }
}

/// The factory a key-constructed service uses unless told otherwise.
pub fn default_factory() -> Arc<dyn ClientFactory> {
    #[cfg(feature = "launchdarkly")]
    {
        Arc::new(crate::launchdarkly::LaunchDarklyFactory::new())
    }

    #[cfg(not(feature = "launchdarkly"))]
    {
        Arc::new(UnavailableFactory)
    }
}
