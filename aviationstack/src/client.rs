use async_trait::async_trait;
use flightdeck::domain::{FlightsEnvelope, UpstreamQuery};
use flightdeck::ports::FlightSource;
use reqwest::Client;
use shared::{Error, Result};
use tracing::debug;

/// Client for the aviationstack `/flights` resource.
///
/// The API key is held by the client and appended to every request as the
/// `access_key` query parameter. It never appears in returned errors.
#[derive(Clone)]
pub struct AviationstackClient {
    client: Client,
    base_url: String,
    access_key: Option<String>,
}

impl AviationstackClient {
    /// Create a new client with a default HTTP client
    pub fn new(base_url: impl Into<String>, access_key: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, access_key)
    }

    /// Create a new client with a custom HTTP client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        access_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key,
        }
    }

    fn flights_url(&self) -> String {
        format!("{}/flights", self.base_url)
    }

    fn query_params(&self, query: &UpstreamQuery) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);

        if let Some(key) = &self.access_key {
            params.push(("access_key", key.clone()));
        }
        params.push(("dep_iata", query.dep_iata.clone()));
        params.push(("arr_iata", query.arr_iata.clone()));
        params.push(("limit", query.limit.to_string()));
        if let Some(date) = &query.flight_date {
            params.push(("flight_date", date.clone()));
        }

        params
    }
}

/// Maps a reqwest failure to a transport error. The URL is dropped first since
/// its query string carries the API key.
fn transport_error(err: reqwest::Error) -> Error {
    Error::Transport(err.without_url().to_string())
}

#[async_trait]
impl FlightSource for AviationstackClient {
    async fn fetch_flights(&self, query: &UpstreamQuery) -> Result<FlightsEnvelope> {
        debug!(
            "Fetching flights {} -> {} (date: {:?}, limit: {})",
            query.dep_iata, query.arr_iata, query.flight_date, query.limit
        );

        let response = self
            .client
            .get(self.flights_url())
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| {
                let err = transport_error(e);
                debug!("Upstream request failed: {}", err);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Upstream responded with status {}", status);
            return Err(Error::Transport(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let text = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&text).map_err(|e| {
            debug!("Failed to parse upstream response: {}", e);
            Error::Transport(format!("Invalid upstream response: {}", e))
        })
    }
}

impl std::fmt::Debug for AviationstackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AviationstackClient")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(|_| "***"))
            .finish()
    }
}
