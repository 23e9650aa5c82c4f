// cloudflag - Boolean feature flags backed by LaunchDarkly
//
// Facade over the workspace crates: flag lookups, configuration sources and
// logging, with the LaunchDarkly SDK behind the `launchdarkly` feature.

// Re-export the flag service and its seams
pub use cloudflag_features::*;

pub use cloudflag_config as config;
pub use cloudflag_log as log;

#[cfg(feature = "testing")]
pub use cloudflag_testing as testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ConfigManager, ConfigSource};
    pub use crate::log::{ConsoleLogger, LogFacade, Logger, SharedLogger};
    pub use crate::{
        ClientFactory, ClientState, ErrorKind, EvaluationClient, EvaluationDetail,
        EvaluationReason, FeatureFlag, FeatureFlagError, FlagService, InMemoryClient,
        SharedFeatureFlag, Subject, compose,
    };

    #[cfg(feature = "launchdarkly")]
    pub use crate::{LaunchDarklyClient, LaunchDarklyFactory};
}
