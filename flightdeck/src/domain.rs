use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date label used in cache keys and results when no `flight_date` was given.
pub const TODAY: &str = "today";

/// Maximum number of flight records requested from the upstream per lookup.
pub const UPSTREAM_LIMIT: u32 = 100;

/// Formats a route as `"{from} → {to}"`.
pub fn format_route(from: &str, to: &str) -> String {
    format!("{} → {}", from, to)
}

/// A validated flight search. Both IATA codes are non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlightQuery {
    pub dep_iata: String,
    pub arr_iata: String,
    pub flight_date: Option<String>,
}

impl FlightQuery {
    pub fn new(
        dep_iata: impl Into<String>,
        arr_iata: impl Into<String>,
        flight_date: Option<String>,
    ) -> Self {
        Self {
            dep_iata: dep_iata.into(),
            arr_iata: arr_iata.into(),
            flight_date,
        }
    }

    /// `flight_date`, or `"today"` when absent.
    pub fn date_label(&self) -> &str {
        self.flight_date.as_deref().unwrap_or(TODAY)
    }

    /// `{dep}-{arr}-{date}`. Identical triples always produce the same key.
    pub fn cache_key(&self) -> String {
        format!("{}-{}-{}", self.dep_iata, self.arr_iata, self.date_label())
    }

    pub fn route(&self) -> String {
        format_route(&self.dep_iata, &self.arr_iata)
    }
}

/// Normalized result of a flight lookup. Never mutated once built; the cache
/// and the response path share it read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub data: Vec<Value>,
    pub count: usize,
    pub route: String,
    pub date: String,
}

impl FlightResult {
    pub fn from_records(data: Vec<Value>, query: &FlightQuery) -> Self {
        Self {
            count: data.len(),
            data,
            route: query.route(),
            date: query.date_label().to_string(),
        }
    }
}

/// Parameters forwarded to the upstream `/flights` resource.
/// The credential is added by the client itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub dep_iata: String,
    pub arr_iata: String,
    pub flight_date: Option<String>,
    pub limit: u32,
}

impl From<&FlightQuery> for UpstreamQuery {
    fn from(query: &FlightQuery) -> Self {
        Self {
            dep_iata: query.dep_iata.clone(),
            arr_iata: query.arr_iata.clone(),
            flight_date: query.flight_date.clone(),
            limit: UPSTREAM_LIMIT,
        }
    }
}

/// Body returned by the upstream: either `{data: [...]}` or `{error: {message}}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FlightsEnvelope {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl FlightsEnvelope {
    pub const GENERIC_ERROR: &str = "API error";

    /// The upstream's error message if the body carries an error.
    /// Falls back to `"API error"` when the error has no usable message.
    /// Falsy values (`null`, `false`, `0`, `""`) mean no error.
    pub fn error_message(&self) -> Option<String> {
        let error = self.error.as_ref().filter(|e| !is_falsy(e))?;
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(Self::GENERIC_ERROR);
        Some(message.to_string())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Deep link into an airline's booking site. Computed per request, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    pub route: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_key_with_date() {
        let query = FlightQuery::new("JFK", "LAX", Some("2024-01-01".to_string()));
        assert_eq!(query.cache_key(), "JFK-LAX-2024-01-01");
    }

    #[test]
    fn test_cache_key_defaults_to_today() {
        let query = FlightQuery::new("JFK", "LAX", None);
        assert_eq!(query.cache_key(), "JFK-LAX-today");
        assert_eq!(query.date_label(), "today");
    }

    #[test]
    fn test_result_count_matches_data() {
        let query = FlightQuery::new("SFO", "ORD", None);
        let result = FlightResult::from_records(vec![json!({"a": 1}), json!({"b": 2})], &query);

        assert_eq!(result.count, 2);
        assert_eq!(result.count, result.data.len());
        assert_eq!(result.route, "SFO → ORD");
        assert_eq!(result.date, "today");
    }

    #[test]
    fn test_upstream_query_carries_limit() {
        let query = FlightQuery::new("JFK", "LAX", Some("2024-01-01".to_string()));
        let upstream = UpstreamQuery::from(&query);

        assert_eq!(upstream.limit, 100);
        assert_eq!(upstream.flight_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_envelope_error_message() {
        let envelope: FlightsEnvelope =
            serde_json::from_value(json!({"error": {"message": "invalid_access_key"}})).unwrap();
        assert_eq!(envelope.error_message().as_deref(), Some("invalid_access_key"));

        let envelope: FlightsEnvelope =
            serde_json::from_value(json!({"error": {"code": "usage_limit_reached"}})).unwrap();
        assert_eq!(envelope.error_message().as_deref(), Some("API error"));

        let envelope: FlightsEnvelope = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(envelope.error_message().is_none());

        let envelope: FlightsEnvelope =
            serde_json::from_value(json!({"data": null, "error": null})).unwrap();
        assert!(envelope.error_message().is_none());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_falsy_error_values_are_not_errors() {
        for error in [json!(""), json!(0), json!(0.0), json!(false), json!(null)] {
            let envelope: FlightsEnvelope =
                serde_json::from_value(json!({"data": [{"flight": "A"}], "error": error}))
                    .unwrap();
            assert!(
                envelope.error_message().is_none(),
                "{} should not count as an error",
                error
            );
        }

        for error in [json!("quota"), json!(1), json!(true), json!([]), json!({})] {
            let envelope: FlightsEnvelope =
                serde_json::from_value(json!({"error": error})).unwrap();
            assert_eq!(envelope.error_message().as_deref(), Some("API error"));
        }
    }

    #[test]
    fn test_booking_link_omits_missing_airline() {
        let link = BookingLink {
            url: "https://example.com".to_string(),
            airline: None,
            route: format_route("", ""),
        };
        let value = serde_json::to_value(&link).unwrap();
        assert!(value.get("airline").is_none());
        assert_eq!(value["route"], " → ");
    }
}
