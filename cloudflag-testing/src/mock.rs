// Mock collaborators for flag service tests

use cloudflag_features::{
    ClientError, ClientFactory, EvaluationClient, EvaluationDetail, EvaluationReason, Subject,
};
use cloudflag_log::{Level, Logger};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One recorded `bool_variation_detail` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationCall {
    pub flag_key: String,
    pub subject_key: String,
    pub default_value: bool,
}

/// Scripted evaluation client.
///
/// Reports itself uninitialized until told otherwise. Flags without a
/// scripted response evaluate to the caller's default with a fallthrough
/// reason.
#[derive(Clone, Default)]
pub struct MockEvaluationClient {
    initialized: Arc<AtomicBool>,
    responses: Arc<Mutex<HashMap<String, EvaluationDetail>>>,
    calls: Arc<Mutex<Vec<EvaluationCall>>>,
}

impl MockEvaluationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initialized(self, initialized: bool) -> Self {
        self.set_initialized(initialized);
        self
    }

    /// Script the detail returned for `flag_key`.
    pub fn with_response(self, flag_key: &str, detail: EvaluationDetail) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(flag_key.to_string(), detail);
        self
    }

    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<EvaluationCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, flag_key: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.flag_key == flag_key)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl EvaluationClient for MockEvaluationClient {
    fn initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn bool_variation_detail(
        &self,
        flag_key: &str,
        subject: &Subject,
        default_value: bool,
    ) -> EvaluationDetail {
        self.calls.lock().unwrap().push(EvaluationCall {
            flag_key: flag_key.to_string(),
            subject_key: subject.key().to_string(),
            default_value,
        });

        self.responses
            .lock()
            .unwrap()
            .get(flag_key)
            .cloned()
            .unwrap_or_else(|| {
                EvaluationDetail::new(default_value, None, EvaluationReason::fallthrough())
            })
    }
}

/// Factory that records the SDK keys it was asked to build from.
#[derive(Clone)]
pub struct MockClientFactory {
    client: Arc<dyn EvaluationClient>,
    failures_left: Arc<AtomicUsize>,
    keys: Arc<Mutex<Vec<String>>>,
}

impl MockClientFactory {
    /// Always hands out `client`.
    pub fn returning(client: Arc<dyn EvaluationClient>) -> Self {
        Self {
            client,
            failures_left: Arc::new(AtomicUsize::new(0)),
            keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Never succeeds.
    pub fn failing() -> Self {
        Self::returning(Arc::new(MockEvaluationClient::new())).fail_times(usize::MAX)
    }

    /// Fail the next `times` builds before succeeding.
    pub fn fail_times(self, times: usize) -> Self {
        self.failures_left.store(times, Ordering::SeqCst);
        self
    }

    pub fn create_count(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl ClientFactory for MockClientFactory {
    fn create(&self, sdk_key: &str) -> Result<Arc<dyn EvaluationClient>, ClientError> {
        self.keys.lock().unwrap().push(sdk_key.to_string());

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();

        if failed {
            Err(ClientError::Build(format!("mock build failure for {}", sdk_key)))
        } else {
            Ok(Arc::clone(&self.client))
        }
    }
}

/// One captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub error: Option<String>,
}

/// Logger that keeps every record in memory.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }

    /// Whether any record at `level` contains `text`.
    pub fn contains(&self, level: Level, text: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry.level == level && entry.message.contains(text))
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str, error: Option<&(dyn StdError + 'static)>) {
        self.entries.lock().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
            error: error.map(|e| e.to_string()),
        });
    }
}
