use crate::domain::{FlightQuery, FlightResult, UpstreamQuery};
use crate::ports::{CacheStore, FlightSource};
use shared::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cache of normalized results keyed by `FlightQuery::cache_key`.
pub type ResultCache = dyn CacheStore<String, Arc<FlightResult>>;

/// Outcome of a lookup: the shared result plus whether it came from the cache.
#[derive(Clone, Debug)]
pub struct FlightLookup {
    pub result: Arc<FlightResult>,
    pub cached: bool,
}

/// Orchestrates a flight lookup: cache first, then at most one upstream call
/// followed by a single cache write.
#[derive(Clone)]
pub struct FlightLookupService {
    cache: Arc<ResultCache>,
    source: Arc<dyn FlightSource>,
}

impl FlightLookupService {
    pub fn new(cache: Arc<ResultCache>, source: Arc<dyn FlightSource>) -> Self {
        Self { cache, source }
    }

    pub async fn lookup(&self, query: FlightQuery) -> Result<FlightLookup> {
        let key = query.cache_key();

        match self.cache.get(&key).await {
            Ok(result) => {
                debug!("Cache hit for '{}'", key);
                return Ok(FlightLookup {
                    result,
                    cached: true,
                });
            }
            Err(Error::NotFound) => debug!("Cache miss for '{}'", key),
            Err(e) => return Err(e),
        }

        // The fetch runs detached so that a caller going away does not abort
        // the upstream call or the cache write that follows it.
        let cache = Arc::clone(&self.cache);
        let source = Arc::clone(&self.source);
        let result = tokio::spawn(Self::fetch_and_store(cache, source, key, query))
            .await
            .map_err(|e| Error::Internal(e.to_string()))??;

        Ok(FlightLookup {
            result,
            cached: false,
        })
    }

    async fn fetch_and_store(
        cache: Arc<ResultCache>,
        source: Arc<dyn FlightSource>,
        key: String,
        query: FlightQuery,
    ) -> Result<Arc<FlightResult>> {
        let envelope = source.fetch_flights(&UpstreamQuery::from(&query)).await?;

        if let Some(message) = envelope.error_message() {
            warn!("Upstream rejected '{}': {}", key, message);
            return Err(Error::Upstream(message));
        }

        let result = Arc::new(FlightResult::from_records(
            envelope.data.unwrap_or_default(),
            &query,
        ));
        cache.put(key, Arc::clone(&result)).await?;

        Ok(result)
    }
}

impl std::fmt::Debug for FlightLookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightLookupService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightsEnvelope;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct MapCache {
        entries: Mutex<HashMap<String, Arc<FlightResult>>>,
    }

    #[async_trait]
    impl CacheStore<String, Arc<FlightResult>> for MapCache {
        async fn put(&self, key: String, val: Arc<FlightResult>) -> Result<()> {
            self.entries.lock().unwrap().insert(key, val);
            Ok(())
        }

        async fn get(&self, key: &String) -> Result<Arc<FlightResult>> {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or(Error::NotFound)
        }
    }

    enum Reply {
        Body(Value),
        Transport(&'static str),
    }

    struct StubSource {
        reply: Reply,
        delay: Duration,
        calls: AtomicUsize,
        last_query: Mutex<Option<UpstreamQuery>>,
    }

    impl StubSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FlightSource for StubSource {
        async fn fetch_flights(&self, query: &UpstreamQuery) -> Result<FlightsEnvelope> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.reply {
                Reply::Body(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
                Reply::Transport(message) => Err(Error::Transport(message.to_string())),
            }
        }
    }

    fn service_with(source: StubSource) -> (FlightLookupService, Arc<MapCache>, Arc<StubSource>) {
        let cache = Arc::new(MapCache::default());
        let source = Arc::new(source);
        let service = FlightLookupService::new(cache.clone(), source.clone());
        (service, cache, source)
    }

    fn jfk_lax() -> FlightQuery {
        FlightQuery::new("JFK", "LAX", Some("2024-01-01".to_string()))
    }

    #[tokio::test]
    async fn test_miss_fetches_and_normalizes() {
        let (service, _cache, source) = service_with(StubSource::new(Reply::Body(json!({
            "data": [{"flight": "A"}, {"flight": "B"}]
        }))));

        let lookup = service.lookup(jfk_lax()).await.unwrap();

        assert!(!lookup.cached);
        assert_eq!(lookup.result.count, 2);
        assert_eq!(lookup.result.data, vec![json!({"flight": "A"}), json!({"flight": "B"})]);
        assert_eq!(lookup.result.route, "JFK → LAX");
        assert_eq!(lookup.result.date, "2024-01-01");
        assert_eq!(source.calls(), 1);

        let forwarded = source.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(forwarded.limit, 100);
        assert_eq!(forwarded.flight_date.as_deref(), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let (service, _cache, source) =
            service_with(StubSource::new(Reply::Body(json!({"data": [{"flight": "A"}]}))));

        let first = service.lookup(jfk_lax()).await.unwrap();
        let second = service.lookup(jfk_lax()).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.result, second.result);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_different_dates_use_different_keys() {
        let (service, _cache, source) =
            service_with(StubSource::new(Reply::Body(json!({"data": []}))));

        service.lookup(jfk_lax()).await.unwrap();
        let today = service
            .lookup(FlightQuery::new("JFK", "LAX", None))
            .await
            .unwrap();

        assert!(!today.cached);
        assert_eq!(today.result.date, "today");
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_data_defaults_to_empty() {
        let (service, _cache, _source) =
            service_with(StubSource::new(Reply::Body(json!({"pagination": {}}))));

        let lookup = service.lookup(jfk_lax()).await.unwrap();

        assert!(lookup.result.data.is_empty());
        assert_eq!(lookup.result.count, 0);
    }

    #[tokio::test]
    async fn test_upstream_error_is_not_cached() {
        let (service, cache, source) = service_with(StubSource::new(Reply::Body(json!({
            "error": {"message": "invalid_access_key"}
        }))));

        let err = service.lookup(jfk_lax()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(ref m) if m == "invalid_access_key"));

        assert!(cache.entries.lock().unwrap().is_empty());
        service.lookup(jfk_lax()).await.unwrap_err();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let (service, cache, _source) =
            service_with(StubSource::new(Reply::Transport("connection refused")));

        let err = service.lookup(jfk_lax()).await.unwrap_err();

        assert!(matches!(err, Error::Transport(ref m) if m == "connection refused"));
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_lookup_still_populates_cache() {
        let mut stub = StubSource::new(Reply::Body(json!({"data": [{"flight": "A"}]})));
        stub.delay = Duration::from_millis(50);
        let (service, cache, source) = service_with(stub);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(5), service.lookup(jfk_lax())).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.entries.lock().unwrap().contains_key("JFK-LAX-2024-01-01"));
        let lookup = service.lookup(jfk_lax()).await.unwrap();
        assert!(lookup.cached);
        assert_eq!(source.calls(), 1);
    }
}
