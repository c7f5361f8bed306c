use serde::Deserialize;

/// Query string of `GET /api/flights`. Presence is checked by validation,
/// not by deserialization, so a missing field yields the JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct FlightsParams {
    pub dep_iata: Option<String>,
    pub arr_iata: Option<String>,
    pub flight_date: Option<String>,
}

/// Query string of `GET /api/booking-url`. Nothing here is required.
#[derive(Debug, Default, Deserialize)]
pub struct BookingUrlParams {
    pub airline: Option<String>,
    pub origin: Option<String>,
    pub dest: Option<String>,
}

impl BookingUrlParams {
    /// Builds the params from raw query pairs. Repeated keys keep their first
    /// value and unknown keys are ignored, so this never fails.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "airline" => &mut params.airline,
                "origin" => &mut params.origin,
                "dest" => &mut params.dest,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }
}
