//! Feature Flags for cloudflag
//!
//! Boolean feature flag lookups backed by LaunchDarkly. The evaluation
//! engine lives in the LaunchDarkly SDK; this crate wraps it with lazy
//! client construction, precondition checks and default-value handling, so
//! flag-service trouble never turns into a crash in calling code.
//!
//! # Features
//!
//! - `launchdarkly` - Build clients with `launchdarkly-server-sdk`. Without it
//!   a service keyed by SDK key cannot build a client, and lookups fail with
//!   `InvalidOperation` until a client is supplied some other way.
//!
//! # Quick Start
//!
//! ```
//! use cloudflag_features::*;
//! use std::sync::Arc;
//!
//! let client = Arc::new(InMemoryClient::offline().with_flag("new-ui", true));
//! let flags: SharedFeatureFlag = compose::feature_flags_with_client(client, None);
//!
//! if flags.get_feature_flag("new-ui", false)? {
//!     // Show new UI
//! }
//! # Ok::<(), FeatureFlagError>(())
//! ```
//!
//! # Keyed From Configuration
//!
//! ```
//! use cloudflag_config::ConfigManager;
//! use cloudflag_features::*;
//! use cloudflag_log::ConsoleLogger;
//! use std::sync::Arc;
//!
//! let config = ConfigManager::new();
//! config.set(SDK_KEY_CONFIG_NAME, "sdk-00000000").unwrap();
//!
//! let service = FlagService::from_config(&config, Arc::new(ConsoleLogger::default()))?;
//! assert_eq!(service.client_state(), ClientState::Unset);
//! # Ok::<(), FeatureFlagError>(())
//! ```

pub mod client;
pub mod compose;
pub mod error;
pub mod flag;
mod lazy;
pub mod memory;
pub mod reason;
pub mod service;
pub mod subject;

#[cfg(feature = "launchdarkly")]
pub mod launchdarkly;

pub use client::{ClientFactory, EvaluationClient, UnavailableFactory, default_factory};
pub use error::{ClientError, FeatureFlagError, Result};
pub use flag::{FeatureFlag, SharedFeatureFlag};
pub use lazy::ClientState;
pub use memory::{InMemoryClient, InMemoryFactory};
pub use reason::{ErrorKind, EvaluationDetail, EvaluationReason};
pub use service::{FlagService, SDK_KEY_CONFIG_NAME};
pub use subject::Subject;

#[cfg(feature = "launchdarkly")]
pub use launchdarkly::{DEFAULT_START_WAIT, LaunchDarklyClient, LaunchDarklyFactory};
