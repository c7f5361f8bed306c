use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

use crate::api::{ErrorResponse, FlightsParams, FlightsResponse};
use crate::state::AppState;
use crate::validation::FlightQueryFactory;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// GET /api/flights?dep_iata=&arr_iata=&flight_date=
pub async fn get_flights(
    State(state): State<AppState>,
    params: Result<Query<FlightsParams>, QueryRejection>,
) -> Result<Json<FlightsResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Rejected flight query string: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;

    let query = FlightQueryFactory::from_params(params).map_err(|e| {
        warn!("Rejected flight lookup: {}", e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
    })?;

    info!(
        "FLIGHTS: dep={}, arr={}, date={}",
        query.dep_iata,
        query.arr_iata,
        query.date_label()
    );

    match state.flight_lookup.lookup(query).await {
        Ok(lookup) => Ok(Json(FlightsResponse::from(lookup))),
        Err(shared::Error::Upstream(message)) => {
            warn!("Upstream error: {}", message);
            Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))))
        }
        Err(e) => {
            error!("Error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::server_error(e.to_string())),
            ))
        }
    }
}
