//! Guarded holder for a lazily constructed evaluation client.

use crate::EvaluationClient;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Lifecycle of the wrapped client.
///
/// `Unset -> Constructing -> Ready` on success, `Unset -> Constructing ->
/// Unset` on failure. There is no terminal failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Unset,
    Constructing,
    Ready,
}

/// Single-flight lazy slot.
///
/// Readers take the read lock only. Construction is serialized by `init`,
/// so concurrent first callers wait for one attempt instead of racing.
pub(crate) struct LazyClient {
    slot: RwLock<Option<Arc<dyn EvaluationClient>>>,
    init: Mutex<()>,
}

impl LazyClient {
    pub(crate) fn empty() -> Self {
        Self {
            slot: RwLock::new(None),
            init: Mutex::new(()),
        }
    }

    pub(crate) fn ready(client: Arc<dyn EvaluationClient>) -> Self {
        Self {
            slot: RwLock::new(Some(client)),
            init: Mutex::new(()),
        }
    }

    pub(crate) fn get(&self) -> Option<Arc<dyn EvaluationClient>> {
        self.slot.read().clone()
    }

    /// Return the cached client, or run `init` once under the construction
    /// lock. A failed `init` leaves the slot empty for the next caller.
    pub(crate) fn get_or_try_init<E>(
        &self,
        init: impl FnOnce() -> Result<Arc<dyn EvaluationClient>, E>,
    ) -> Result<Arc<dyn EvaluationClient>, E> {
        if let Some(client) = self.get() {
            return Ok(client);
        }

        let _guard = self.init.lock();
        // Another caller may have finished while we waited.
        if let Some(client) = self.get() {
            return Ok(client);
        }

        let client = init()?;
        *self.slot.write() = Some(Arc::clone(&client));
        Ok(client)
    }

    pub(crate) fn state(&self) -> ClientState {
        if self.slot.read().is_some() {
            ClientState::Ready
        } else if self.init.is_locked() {
            ClientState::Constructing
        } else {
            ClientState::Unset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryClient;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_failed_init_leaves_slot_unset() {
        let lazy = LazyClient::empty();
        let result: Result<_, &str> = lazy.get_or_try_init(|| Err("boom"));

        assert!(result.is_err());
        assert_eq!(lazy.state(), ClientState::Unset);
        assert!(lazy.get().is_none());
    }

    #[test]
    fn test_retry_after_failure_then_cache() {
        let lazy = LazyClient::empty();
        let attempts = AtomicUsize::new(0);

        let make = || -> Result<Arc<dyn EvaluationClient>, &'static str> {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("first attempt fails")
            } else {
                Ok(Arc::new(InMemoryClient::offline()))
            }
        };

        assert!(lazy.get_or_try_init(make).is_err());
        assert!(lazy.get_or_try_init(make).is_ok());
        assert!(lazy.get_or_try_init(make).is_ok());

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(lazy.state(), ClientState::Ready);
    }

    #[test]
    fn test_state_is_constructing_during_init() {
        let lazy = LazyClient::empty();
        let seen = lazy
            .get_or_try_init(|| -> Result<Arc<dyn EvaluationClient>, ClientState> {
                Err(lazy.state())
            })
            .err();

        assert_eq!(seen, Some(ClientState::Constructing));
    }

    #[test]
    fn test_ready_slot_skips_init() {
        let lazy = LazyClient::ready(Arc::new(InMemoryClient::offline()));
        let result: Result<_, ()> = lazy.get_or_try_init(|| panic!("must not construct"));

        assert!(result.is_ok());
        assert_eq!(lazy.state(), ClientState::Ready);
    }
}
