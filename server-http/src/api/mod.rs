pub mod requests;
pub mod responses;

pub use requests::{BookingUrlParams, FlightsParams};
pub use responses::{ErrorResponse, FlightsResponse, StatusResponse};
