use crate::domain::{FlightsEnvelope, UpstreamQuery};
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points for the cache and the upstream API

/// Port for the response cache.
/// `get` returns `Error::NotFound` for keys that were never set or have expired.
#[async_trait]
pub trait CacheStore<K, V>: Send + Sync + 'static {
    async fn put(&self, key: K, val: V) -> Result<()>;
    async fn get(&self, key: &K) -> Result<V>;
}

/// Port for the third-party flight data API.
#[async_trait]
pub trait FlightSource: Send + Sync + 'static {
    /// Performs one call to the upstream `/flights` resource.
    /// Transport-level failures are `Error::Transport`; a structured error in the
    /// body is returned as part of the envelope.
    async fn fetch_flights(&self, query: &UpstreamQuery) -> Result<FlightsEnvelope>;
}
