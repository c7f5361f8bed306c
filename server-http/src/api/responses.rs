use flightdeck::{FlightLookup, FlightResult};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// A flight result plus whether it was served from the cache.
#[derive(Debug, Serialize)]
pub struct FlightsResponse {
    #[serde(flatten)]
    pub result: Arc<FlightResult>,
    pub cached: bool,
}

impl From<FlightLookup> for FlightsResponse {
    fn from(lookup: FlightLookup) -> Self {
        Self {
            result: lookup.result,
            cached: lookup.cached,
        }
    }
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// `{error: "Server error", message}` for failures the caller cannot fix.
    pub fn server_error(message: impl Into<String>) -> Self {
        Self {
            error: "Server error".to_string(),
            message: Some(message.into()),
        }
    }
}
