use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Set of recipient numbers with a call attempt currently running.
///
/// A second submission for the same number while the first is still
/// waiting on the calling API is refused instead of placing two calls.
#[derive(Debug, Clone, Default)]
pub struct InFlightCalls {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl InFlightCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for the lifetime of the returned guard. Returns `None`
    /// when another attempt already holds it.
    pub fn claim(&self, key: &str) -> Option<InFlightGuard> {
        let mut set = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(key.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            calls: self.clone(),
            key: key.to_string(),
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases its key when dropped, including on early return or panic.
#[derive(Debug)]
pub struct InFlightGuard {
    calls: InFlightCalls,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.calls
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
