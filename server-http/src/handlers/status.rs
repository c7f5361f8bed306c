use axum::Json;

use crate::api::StatusResponse;

/// GET /
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        message: "Flight Tracker Backend",
        endpoints: vec!["/api/flights", "/api/booking-url"],
    })
}
