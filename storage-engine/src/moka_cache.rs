use async_trait::async_trait;
use flightdeck::domain::FlightResult;
use flightdeck::ports::CacheStore;
use moka::future::Cache;
use shared::{Error, Result};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Moka-based cache with a fixed, cache-wide TTL.
/// Expired entries are never returned; moka reclaims them lazily.
pub struct MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    cache: Cache<K, V>,
    ttl: Duration,
}

/// Cache of normalized flight results, keyed by route and date.
pub type FlightCache = MokaCache<String, Arc<FlightResult>>;

impl<K, V> MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    /// Create a new unbounded cache. Memory grows with the number of distinct keys.
    pub fn new_unbounded(ttl: Duration) -> Self {
        Self::new(ttl, None)
    }

    /// Create a new bounded cache holding at most `max_entries` entries
    pub fn new_bounded(ttl: Duration, max_entries: u64) -> Self {
        Self::new(ttl, Some(max_entries))
    }

    pub fn new(ttl: Duration, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().time_to_live(ttl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Approximate number of live entries
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    async fn put(&self, key: K, val: V) -> Result<()> {
        debug!("Caching {:?} for {:?}", key, self.ttl);
        // Overwrites any previous entry and restarts its TTL
        self.cache.insert(key, val).await;
        Ok(())
    }

    async fn get(&self, key: &K) -> Result<V> {
        match self.cache.get(key).await {
            Some(value) => Ok(value),
            None => Err(Error::NotFound), // Either doesn't exist or TTL expired
        }
    }
}

impl<K, V> Debug for MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("ttl", &self.ttl)
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
