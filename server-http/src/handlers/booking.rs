use axum::{extract::Query, Json};
use flightdeck::{resolve_booking_url, BookingLink};
use tracing::info;

use crate::api::BookingUrlParams;

/// GET /api/booking-url
///
/// Reads the query as raw pairs so repeated or unexpected keys never reject
/// the request.
pub async fn get_booking_url(Query(pairs): Query<Vec<(String, String)>>) -> Json<BookingLink> {
    let params = BookingUrlParams::from_pairs(pairs);

    info!(
        "BOOKING: airline={:?}, origin={:?}, dest={:?}",
        params.airline, params.origin, params.dest
    );

    Json(resolve_booking_url(
        params.airline.as_deref(),
        params.origin.as_deref(),
        params.dest.as_deref(),
    ))
}
