//! TTL read-through cache for aggregate query reads
//!
//! The cache owns its map, its lock, and its clock. One coarse async lock
//! covers lookup, miss computation, and expiry, so concurrent cache-missing
//! reads are serialized and compute each aggregate once. Expiry is lazy: an
//! entry past its TTL is dropped the next time it is looked up. Errors from
//! the compute closure are never cached.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::RankingKind;

/// Time source, injectable so expiry is testable
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used in production
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Canonicalized cache key: tool name plus the parameters that shape the
/// result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    tool: &'static str,
    user: String,
    rivals: Vec<String>,
    kind: Option<RankingKind>,
}

impl CacheKey {
    pub fn new(tool: &'static str) -> Self {
        Self {
            tool,
            user: String::new(),
            rivals: Vec::new(),
            kind: None,
        }
    }

    pub fn user(mut self, user: &str) -> Self {
        self.user = user.to_string();
        self
    }

    /// Rival order is irrelevant to the result, so the key sorts and dedups
    pub fn rivals(mut self, rivals: &[String]) -> Self {
        let mut rivals = rivals.to_vec();
        rivals.sort();
        rivals.dedup();
        self.rivals = rivals;
        self
    }

    pub fn kind(mut self, kind: RankingKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Read-through cache fronting expensive aggregate reads
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QueryCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Return the cached value for `key`, computing and storing it on miss
    /// or after expiry
    pub async fn get_or_compute<F, Fut>(&self, key: CacheKey, compute: F) -> AppResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Value>>,
    {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();

        match entries.get(&key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                return Ok(entry.value.clone());
            }
            Some(_) => {
                entries.remove(&key);
            }
            None => {}
        }

        let value = compute().await?;
        entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                stored_at: now,
            },
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::AppError;

    /// Clock that only moves when told to
    struct MockClock {
        base: Instant,
        offset: std::sync::Mutex<Duration>,
    }

    impl MockClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: std::sync::Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock().unwrap()
        }
    }

    fn ranking_key() -> CacheKey {
        CacheKey::new("ranking").kind(RankingKind::Shortest)
    }

    #[tokio::test]
    async fn test_second_read_within_ttl_hits_cache() {
        let clock = Arc::new(MockClock::new());
        let cache = QueryCache::new(Duration::from_secs(180), clock.clone());
        let computed = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_compute(ranking_key(), || async {
                    computed.fetch_add(1, Ordering::SeqCst);
                    Ok(Value::from(42))
                })
                .await
                .unwrap();
            assert_eq!(value, Value::from(42));
        }

        assert_eq!(computed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_after_ttl_recomputes() {
        let clock = Arc::new(MockClock::new());
        let cache = QueryCache::new(Duration::from_secs(180), clock.clone());
        let computed = AtomicUsize::new(0);

        let compute = || async {
            computed.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from("fresh"))
        };

        cache.get_or_compute(ranking_key(), compute).await.unwrap();
        clock.advance(Duration::from_secs(181));
        cache.get_or_compute(ranking_key(), compute).await.unwrap();

        assert_eq!(computed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_keys_compute_separately() {
        let clock = Arc::new(MockClock::new());
        let cache = QueryCache::new(Duration::from_secs(180), clock);

        let a = cache
            .get_or_compute(CacheKey::new("problems").user("alice"), || async {
                Ok(Value::from("a"))
            })
            .await
            .unwrap();
        let b = cache
            .get_or_compute(CacheKey::new("problems").user("bob"), || async {
                Ok(Value::from("b"))
            })
            .await
            .unwrap();

        assert_eq!(a, Value::from("a"));
        assert_eq!(b, Value::from("b"));
    }

    #[tokio::test]
    async fn test_rival_order_does_not_split_the_key() {
        let clock = Arc::new(MockClock::new());
        let cache = QueryCache::new(Duration::from_secs(180), clock);
        let computed = AtomicUsize::new(0);

        let first = ["bob".to_string(), "alice".to_string()];
        let second = ["alice".to_string(), "bob".to_string(), "bob".to_string()];

        for rivals in [&first[..], &second[..]] {
            cache
                .get_or_compute(CacheKey::new("problems").rivals(rivals), || async {
                    computed.fetch_add(1, Ordering::SeqCst);
                    Ok(Value::Null)
                })
                .await
                .unwrap();
        }

        assert_eq!(computed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let clock = Arc::new(MockClock::new());
        let cache = QueryCache::new(Duration::from_secs(180), clock);
        let computed = AtomicUsize::new(0);

        let result = cache
            .get_or_compute(ranking_key(), || async {
                computed.fetch_add(1, Ordering::SeqCst);
                Err(AppError::Database("down".to_string()))
            })
            .await;
        assert!(result.is_err());

        let value = cache
            .get_or_compute(ranking_key(), || async {
                computed.fetch_add(1, Ordering::SeqCst);
                Ok(Value::from(7))
            })
            .await
            .unwrap();

        assert_eq!(value, Value::from(7));
        assert_eq!(computed.load(Ordering::SeqCst), 2);
    }
}
