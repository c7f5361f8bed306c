pub mod booking;
pub mod flights;
pub mod status;

pub use booking::get_booking_url;
pub use flights::get_flights;
pub use status::status;
