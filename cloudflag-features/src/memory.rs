//! In-memory evaluation client.
//!
//! Serves fixed boolean values without contacting any flag service. Useful
//! for offline operation, local development and tests.

use crate::{
    ClientError, ClientFactory, ErrorKind, EvaluationClient, EvaluationDetail, EvaluationReason,
    Subject,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy)]
enum Entry {
    Value(bool),
    Failure(ErrorKind),
}

/// Client backed by a map of flag values.
///
/// Unknown flags evaluate to the caller's default with a `FLAG_NOT_FOUND`
/// error reason, the way a LaunchDarkly client without data behaves.
#[derive(Debug)]
pub struct InMemoryClient {
    initialized: AtomicBool,
    flags: RwLock<HashMap<String, Entry>>,
}

impl InMemoryClient {
    /// Initialized client with no flag data.
    pub fn offline() -> Self {
        Self {
            initialized: AtomicBool::new(true),
            flags: RwLock::new(HashMap::new()),
        }
    }

    /// Client that reports itself as not yet initialized.
    pub fn uninitialized() -> Self {
        let client = Self::offline();
        client.set_initialized(false);
        client
    }

    pub fn with_flag(self, key: impl Into<String>, value: bool) -> Self {
        self.set_flag(key, value);
        self
    }

    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::SeqCst);
    }

    pub fn set_flag(&self, key: impl Into<String>, value: bool) {
        self.flags.write().insert(key.into(), Entry::Value(value));
    }

    /// Make every evaluation of `key` fail with `kind`.
    pub fn set_error(&self, key: impl Into<String>, kind: ErrorKind) {
        self.flags.write().insert(key.into(), Entry::Failure(kind));
    }

    pub fn remove_flag(&self, key: &str) {
        self.flags.write().remove(key);
    }
}

impl Default for InMemoryClient {
    fn default() -> Self {
        Self::offline()
    }
}

impl EvaluationClient for InMemoryClient {
    fn initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn bool_variation_detail(
        &self,
        flag_key: &str,
        _subject: &Subject,
        default_value: bool,
    ) -> EvaluationDetail {
        if !self.initialized() {
            return EvaluationDetail::error(default_value, ErrorKind::ClientNotReady);
        }

        match self.flags.read().get(flag_key) {
            // Boolean flags carry variations [true, false].
            Some(Entry::Value(value)) => EvaluationDetail::new(
                *value,
                Some(if *value { 0 } else { 1 }),
                EvaluationReason::fallthrough(),
            ),
            Some(Entry::Failure(kind)) => EvaluationDetail::error(default_value, *kind),
            None => EvaluationDetail::error(default_value, ErrorKind::FlagNotFound),
        }
    }
}

/// Factory handing out one shared [`InMemoryClient`] for any SDK key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactory {
    client: Arc<InMemoryClient>,
}

impl InMemoryFactory {
    pub fn new(client: Arc<InMemoryClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<InMemoryClient> {
        &self.client
    }
}

impl ClientFactory for InMemoryFactory {
    fn create(&self, _sdk_key: &str) -> Result<Arc<dyn EvaluationClient>, ClientError> {
        Ok(self.client.clone())
    }
}
