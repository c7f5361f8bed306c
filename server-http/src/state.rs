use aviationstack::AviationstackClient;
use flightdeck::FlightLookupService;
use shared::config::Config;
use std::sync::Arc;
use storage_engine::FlightCache;

/// Server state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub flight_lookup: FlightLookupService,
}

impl AppState {
    /// Wires the moka cache and the aviationstack client from configuration.
    /// The cache lives exactly as long as the state.
    pub fn new(config: &Config) -> Self {
        let cache = Arc::new(FlightCache::new(config.cache_ttl, config.cache_max_entries));
        match config.cache_max_entries {
            Some(max) => tracing::info!(
                "Flight cache initialized (ttl: {:?}, max entries: {})",
                config.cache_ttl,
                max
            ),
            None => tracing::info!(
                "Flight cache initialized (ttl: {:?}, unbounded)",
                config.cache_ttl
            ),
        }

        let client = Arc::new(AviationstackClient::new(
            config.upstream_base_url.clone(),
            config.api_key.clone(),
        ));

        Self::with_lookup(FlightLookupService::new(cache, client))
    }

    pub fn with_lookup(flight_lookup: FlightLookupService) -> Self {
        Self { flight_lookup }
    }
}
