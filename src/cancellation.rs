//! Registry of in-flight cancelable effects, grouped by cancel key.
//!
//! Effects launched with a cancel id register a [`CancelHandle`] here. A
//! newer effect under the same id cancels the older ones first, and a
//! reducer can cancel an id explicitly. Completion callbacks from many
//! effects may touch the registry at once, so all access is serialized by a
//! mutex.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle that cancels one running effect.
///
/// Handles compare by identity, not by token state, so two effects under
/// the same key are tracked separately.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    id: u64,
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            token,
        }
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl PartialEq for CancelHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CancelHandle {}

impl Hash for CancelHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Thread-safe map from cancel key to the handles running under it.
///
/// Invariants:
/// - inserting under a key that already has entries accumulates
/// - canceling a key cancels and removes everything under it
/// - a key whose set becomes empty is removed
#[derive(Debug, Clone, Default)]
pub struct CancellationRegistry {
    inner: Arc<Mutex<HashMap<String, HashSet<CancelHandle>>>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `handle` under `key`. No-op without a key.
    pub fn insert(&self, handle: CancelHandle, key: Option<&str>) {
        let Some(key) = key else {
            return;
        };
        self.inner
            .lock()
            .entry(key.to_string())
            .or_default()
            .insert(handle);
    }

    /// Stop tracking `handle`; drops the key once nothing is left under it.
    pub fn remove(&self, handle: &CancelHandle, key: Option<&str>) {
        let Some(key) = key else {
            return;
        };
        let mut storage = self.inner.lock();
        if let Some(handles) = storage.get_mut(key) {
            handles.remove(handle);
            if handles.is_empty() {
                storage.remove(key);
            }
        }
    }

    /// Cancel and forget every handle under `key`.
    ///
    /// Canceling an unknown key, or a key whose effects already finished,
    /// does nothing.
    pub fn cancel(&self, key: Option<&str>) {
        let Some(key) = key else {
            return;
        };
        // Tokens are canceled outside the lock.
        let handles = self.inner.lock().remove(key);
        if let Some(handles) = handles {
            tracing::debug!(cancel_id = %key, count = handles.len(), "Canceling effects");
            for handle in handles {
                handle.cancel();
            }
        }
    }

    /// Cancel everything.
    pub fn cancel_all(&self) {
        let storage = std::mem::take(&mut *self.inner.lock());
        for handle in storage.into_values().flatten() {
            handle.cancel();
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Number of handles registered under `key`.
    pub fn count(&self, key: &str) -> usize {
        self.inner.lock().get(key).map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> CancelHandle {
        CancelHandle::new(CancellationToken::new())
    }

    #[test]
    fn insert_without_key_is_noop() {
        let registry = CancellationRegistry::new();
        registry.insert(handle(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn insert_accumulates_under_key() {
        let registry = CancellationRegistry::new();
        registry.insert(handle(), Some("fetch"));
        registry.insert(handle(), Some("fetch"));
        assert_eq!(registry.count("fetch"), 2);
    }

    #[test]
    fn remove_last_handle_drops_key() {
        let registry = CancellationRegistry::new();
        let first = handle();
        let second = handle();
        registry.insert(first.clone(), Some("fetch"));
        registry.insert(second.clone(), Some("fetch"));

        registry.remove(&first, Some("fetch"));
        assert!(registry.contains_key("fetch"));
        assert!(!first.is_cancelled());

        registry.remove(&second, Some("fetch"));
        assert!(!registry.contains_key("fetch"));
    }

    #[test]
    fn cancel_cancels_every_handle_and_drops_key() {
        let registry = CancellationRegistry::new();
        let first = handle();
        let second = handle();
        let other = handle();
        registry.insert(first.clone(), Some("fetch"));
        registry.insert(second.clone(), Some("fetch"));
        registry.insert(other.clone(), Some("tick"));

        registry.cancel(Some("fetch"));

        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
        assert!(!other.is_cancelled());
        assert!(!registry.contains_key("fetch"));
        assert!(registry.contains_key("tick"));
    }

    #[test]
    fn cancel_twice_is_harmless() {
        let registry = CancellationRegistry::new();
        let first = handle();
        registry.insert(first.clone(), Some("fetch"));

        registry.cancel(Some("fetch"));
        registry.cancel(Some("fetch"));
        registry.cancel(None);

        assert!(first.is_cancelled());
        assert!(registry.is_empty());
    }

    #[test]
    fn cancel_after_natural_completion_is_harmless() {
        let registry = CancellationRegistry::new();
        let first = handle();
        registry.insert(first.clone(), Some("fetch"));
        registry.remove(&first, Some("fetch"));

        registry.cancel(Some("fetch"));

        assert!(!first.is_cancelled());
        assert!(!registry.contains_key("fetch"));
    }

    #[test]
    fn cancel_all_clears_registry() {
        let registry = CancellationRegistry::new();
        let first = handle();
        let second = handle();
        registry.insert(first.clone(), Some("a"));
        registry.insert(second.clone(), Some("b"));

        registry.cancel_all();

        assert!(first.is_cancelled() && second.is_cancelled());
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_insert_and_cancel() {
        let registry = CancellationRegistry::new();
        let threads: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let h = handle();
                        registry.insert(h.clone(), Some("shared"));
                        if i % 2 == 0 {
                            registry.remove(&h, Some("shared"));
                        } else {
                            registry.cancel(Some("shared"));
                        }
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }
        registry.cancel(Some("shared"));
        assert!(registry.is_empty());
    }
}
