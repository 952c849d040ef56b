use dashmap::DashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct Entry<V> {
    value: V,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

type Slot<V> = Arc<Mutex<Option<Entry<V>>>>;

/// Memoizes fallible async computations per key for a fixed time window.
///
/// Each key owns a slot behind an async mutex. The slot is created atomically
/// in the map, and a caller holds its lock while computing, so concurrent
/// callers for the same key wait for the first one instead of computing again.
/// Errors are never stored.
pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: DashMap<K, Slot<V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live value for `key`, or runs `compute` and stores its
    /// result for `ttl` from now.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        // the map guard is released at the end of this statement, before any await
        let slot = Arc::clone(&self.slots.entry(key.clone()).or_default());
        let mut guard = slot.lock().await;

        if let Some(entry) = guard.as_ref() {
            if entry.is_live(Instant::now()) {
                tracing::debug!(?key, "cache hit");
                return Ok(entry.value.clone());
            }
            tracing::debug!(?key, "cache entry expired");
        } else {
            tracing::debug!(?key, "cache miss");
        }

        let value = compute().await?;
        *guard = Some(Entry {
            value: value.clone(),
            expires_at: Instant::now().checked_add(self.ttl),
        });
        Ok(value)
    }

    /// Drops slots whose entry expired (or was never filled) and that no
    /// caller is currently using.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.slots.len();
        self.slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(guard) => guard.as_ref().is_some_and(|e| e.is_live(now)),
                Err(_) => true,
            }
        });
        before.saturating_sub(self.slots.len())
    }

    /// Number of keys holding a live value. Slots busy computing are counted.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.slots
            .iter()
            .filter(|slot| match slot.value().try_lock() {
                Ok(guard) => guard.as_ref().is_some_and(|e| e.is_live(now)),
                Err(_) => true,
            })
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
