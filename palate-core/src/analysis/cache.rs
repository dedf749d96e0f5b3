//! TTL + LRU cache for per-customer analyses, with single-flight computation
//!
//! Entries live for a fixed TTL and are evicted lazily on lookup. The cache is
//! an owned service; callers share it through an `Arc`.

use crate::analysis::types::UserFeedbackAnalysis;
use crate::config::CacheConfig;
use dashmap::DashMap;
use lru::LruCache;
use serde::Serialize;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

pub type AnalysisCache = TtlCache<UserFeedbackAnalysis>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expired_evictions: u64,
    pub entries: usize,
}

/// Result of a cache-filling computation
pub struct Computed<V> {
    pub value: V,
    pub cacheable: bool,
}

impl<V> Computed<V> {
    pub fn cacheable(value: V) -> Self {
        Self {
            value,
            cacheable: true,
        }
    }

    /// Returned to the caller but not stored
    pub fn transient(value: V) -> Self {
        Self {
            value,
            cacheable: false,
        }
    }
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

struct Inner<V> {
    entries: LruCache<String, CacheEntry<V>>,
    stats: CacheStats,
}

pub struct TtlCache<V> {
    inner: Mutex<Inner<V>>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// A zero capacity is treated as one entry.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
            in_flight: DashMap::new(),
            ttl,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl(), config.max_entries)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`; an expired entry is evicted and reported absent.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock().await;
        let found = self.fresh(&mut inner, key);
        if found.is_some() {
            inner.stats.hits += 1;
        } else {
            inner.stats.misses += 1;
        }
        found
    }

    /// Lookup shared by `get` and the single-flight re-check. Only expiry is
    /// counted here; hits and misses are counted once per caller lookup.
    fn fresh(&self, inner: &mut Inner<V>, key: &str) -> Option<V> {
        let Inner { entries, stats } = inner;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            return Some(entry.value.clone());
        }
        entries.pop(key);
        stats.expired_evictions += 1;
        stats.entries = entries.len();
        None
    }

    pub async fn put(&self, key: impl Into<String>, value: V) {
        let mut inner = self.inner.lock().await;
        inner.entries.put(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        inner.stats.entries = inner.entries.len();
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
        inner.stats = CacheStats::default();
    }

    /// Return the cached value or run `compute` once per key.
    ///
    /// Concurrent callers missing on the same key wait on a per-key guard
    /// and re-check the cache once they hold it, so only the first caller
    /// computes. Transient results are handed back without being stored;
    /// waiting callers then compute for themselves.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Computed<V>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(key, "cache hit");
            return value;
        }

        let guard = self
            .in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let value = {
            let _held = guard.lock().await;

            let filled = {
                let mut inner = self.inner.lock().await;
                self.fresh(&mut inner, key)
            };
            if let Some(value) = filled {
                debug!(key, "cache filled while waiting");
                value
            } else {
                debug!(key, "cache miss; computing");
                let computed = compute().await;
                if computed.cacheable {
                    self.put(key, computed.value.clone()).await;
                }
                computed.value
            }
        };

        // With our clone gone, a count of one means only the map still holds
        // the guard. Clones are taken under the same shard lock as this check.
        let guard_ptr = Arc::as_ptr(&guard);
        drop(guard);
        self.in_flight.remove_if(key, |_, current| {
            Arc::as_ptr(current) == guard_ptr && Arc::strong_count(current) == 1
        });

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60), 4);
        cache.put("c-1", 42u32).await;

        assert_eq!(cache.get("c-1").await, Some(42));
        assert_eq!(cache.get("c-2").await, None);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted() {
        let cache = TtlCache::new(Duration::from_millis(20), 4);
        cache.put("c-1", "stale".to_string()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.get("c-1").await, None);
        let stats = cache.stats().await;
        assert_eq!(stats.expired_evictions, 1);
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        cache.put("a", 1).await;
        cache.put("b", 2).await;
        assert_eq!(cache.get("a").await, Some(1));
        cache.put("c", 3).await;

        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.get("a").await, Some(1));
        assert_eq!(cache.get("c").await, Some(3));
    }

    #[tokio::test]
    async fn test_zero_capacity_still_holds_one() {
        let cache = TtlCache::new(Duration::from_secs(60), 0);
        cache.put("a", 1).await;
        assert_eq!(cache.get("a").await, Some(1));
    }

    #[tokio::test]
    async fn test_single_flight_runs_one_computation() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60), 8));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute("c-1", || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        Computed::cacheable(7u32)
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.in_flight.is_empty());

        // every caller is counted exactly once
        let stats = cache.stats().await;
        assert_eq!(stats.hits + stats.misses, 8);
        assert!(stats.misses >= 1);
    }

    #[tokio::test]
    async fn test_cold_lookup_counts_one_miss() {
        let cache = TtlCache::new(Duration::from_secs(60), 8);

        let value = cache
            .get_or_compute("c-1", || async { Computed::cacheable(5u32) })
            .await;
        assert_eq!(value, 5);
        assert_eq!(
            cache.stats().await,
            CacheStats {
                hits: 0,
                misses: 1,
                expired_evictions: 0,
                entries: 1,
            }
        );

        cache
            .get_or_compute("c-1", || async { Computed::cacheable(6u32) })
            .await;
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert!(cache.in_flight.is_empty());
    }

    #[tokio::test]
    async fn test_transient_result_is_not_stored() {
        let cache = TtlCache::new(Duration::from_secs(60), 8);

        let first = cache
            .get_or_compute("c-1", || async { Computed::transient(1u32) })
            .await;
        let second = cache
            .get_or_compute("c-1", || async { Computed::cacheable(2u32) })
            .await;
        let third = cache
            .get_or_compute("c-1", || async { Computed::cacheable(3u32) })
            .await;

        assert_eq!((first, second, third), (1, 2, 2));
    }
}
