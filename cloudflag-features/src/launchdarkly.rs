//! LaunchDarkly SDK adapter (feature `launchdarkly`).

use crate::{
    ClientError, ClientFactory, ErrorKind, EvaluationClient, EvaluationDetail, EvaluationReason,
    Subject,
};
use cloudflag_log::debug;
use launchdarkly_server_sdk::{Client, ConfigBuilder, ContextBuilder, Detail, EvalError, Reason};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};

/// How long [`LaunchDarklyFactory`] waits for a new online client to
/// receive its flag data.
pub const DEFAULT_START_WAIT: Duration = Duration::from_secs(5);

/// [`EvaluationClient`] over a started LaunchDarkly SDK client.
pub struct LaunchDarklyClient {
    inner: Client,
}

impl LaunchDarklyClient {
    /// Wrap an SDK client the caller built and started.
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

fn error_kind(error: &EvalError) -> ErrorKind {
    match error {
        EvalError::ClientNotReady => ErrorKind::ClientNotReady,
        EvalError::FlagNotFound => ErrorKind::FlagNotFound,
        EvalError::MalformedFlag => ErrorKind::MalformedFlag,
        EvalError::WrongType => ErrorKind::WrongType,
        #[allow(unreachable_patterns)]
        _ => ErrorKind::Exception,
    }
}

fn reason(reason: &Reason) -> EvaluationReason {
    match reason {
        Reason::Off => EvaluationReason::Off,
        Reason::TargetMatch => EvaluationReason::TargetMatch,
        Reason::Fallthrough { in_experiment } => EvaluationReason::Fallthrough {
            in_experiment: *in_experiment,
        },
        Reason::RuleMatch {
            rule_index,
            rule_id,
            ..
        } => EvaluationReason::RuleMatch {
            rule_index: *rule_index,
            rule_id: rule_id.clone(),
        },
        Reason::PrerequisiteFailed { prerequisite_key } => EvaluationReason::PrerequisiteFailed {
            prerequisite_key: prerequisite_key.clone(),
        },
        Reason::Error { error } => EvaluationReason::error(error_kind(error)),
        #[allow(unreachable_patterns)]
        _ => EvaluationReason::fallthrough(),
    }
}

fn evaluation_detail(detail: Detail<bool>, default_value: bool) -> EvaluationDetail {
    EvaluationDetail::new(
        detail.value.unwrap_or(default_value),
        detail
            .variation_index
            .and_then(|index| usize::try_from(index).ok()),
        reason(&detail.reason),
    )
}

impl EvaluationClient for LaunchDarklyClient {
    fn initialized(&self) -> bool {
        self.inner.initialized()
    }

    fn bool_variation_detail(
        &self,
        flag_key: &str,
        subject: &Subject,
        default_value: bool,
    ) -> EvaluationDetail {
        let mut builder = ContextBuilder::new(subject.key());
        for (name, value) in subject.attributes() {
            builder.set_string(name, value);
        }

        let context = match builder.build() {
            Ok(context) => context,
            Err(err) => {
                debug!("Invalid evaluation context for {}: {}", subject.key(), err);
                return EvaluationDetail::error(default_value, ErrorKind::UserNotSpecified);
            }
        };

        let detail = self
            .inner
            .bool_variation_detail(&context, flag_key, default_value);

        evaluation_detail(detail, default_value)
    }
}

/// Builds and starts LaunchDarkly SDK clients.
///
/// Starting spawns the SDK's update tasks on the current tokio runtime, so
/// `create` fails when called outside one.
///
/// Online clients are then waited on for up to [`start_wait`] so the first
/// lookup can already evaluate. The wait needs a multi-thread runtime; on a
/// current-thread runtime `create` returns right after starting and lookups
/// report the client as not initialized until its data arrives.
///
/// [`start_wait`]: LaunchDarklyFactory::start_wait
#[derive(Debug, Clone)]
pub struct LaunchDarklyFactory {
    offline: bool,
    start_wait: Duration,
}

impl LaunchDarklyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offline clients never connect and serve defaults for every flag.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Maximum time `create` blocks waiting for initialization.
    /// `Duration::ZERO` disables the wait.
    pub fn start_wait(mut self, start_wait: Duration) -> Self {
        self.start_wait = start_wait;
        self
    }

    fn should_wait(&self, flavor: RuntimeFlavor) -> bool {
        !self.offline && !self.start_wait.is_zero() && flavor == RuntimeFlavor::MultiThread
    }
}

impl Default for LaunchDarklyFactory {
    fn default() -> Self {
        Self {
            offline: false,
            start_wait: DEFAULT_START_WAIT,
        }
    }
}

impl ClientFactory for LaunchDarklyFactory {
    fn create(&self, sdk_key: &str) -> Result<Arc<dyn EvaluationClient>, ClientError> {
        let handle = Handle::try_current().map_err(|e| ClientError::Runtime(e.to_string()))?;

        let config = ConfigBuilder::new(sdk_key)
            .offline(self.offline)
            .build()
            .map_err(|e| ClientError::Build(format!("{:?}", e)))?;
        let client = Client::build(config).map_err(|e| ClientError::Build(format!("{:?}", e)))?;

        debug!("Starting LaunchDarkly client (offline: {})", self.offline);
        client.start_with_default_executor();

        if self.should_wait(handle.runtime_flavor()) {
            let outcome = tokio::task::block_in_place(|| {
                handle.block_on(client.wait_for_initialization(self.start_wait))
            });
            debug!("LaunchDarkly client start wait finished: {:?}", outcome);
        }

        Ok(Arc::new(LaunchDarklyClient::from_client(client)))
    }
}
