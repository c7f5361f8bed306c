use crate::api::FlightsParams;
use flightdeck::FlightQuery;

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequiredParameters,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRequiredParameters => {
                write!(f, "Missing required parameters: dep_iata, arr_iata")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub struct FlightQueryFactory;

impl FlightQueryFactory {
    /// Validates the query string and returns a FlightQuery or validation error.
    /// Empty values count as missing. `flight_date` is passed through unchecked.
    pub fn from_params(params: FlightsParams) -> Result<FlightQuery, ValidationError> {
        let dep_iata = Self::non_empty(params.dep_iata);
        let arr_iata = Self::non_empty(params.arr_iata);

        match (dep_iata, arr_iata) {
            (Some(dep), Some(arr)) => Ok(FlightQuery::new(
                dep,
                arr,
                Self::non_empty(params.flight_date),
            )),
            _ => Err(ValidationError::MissingRequiredParameters),
        }
    }

    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }
}
