pub mod booking;
pub mod domain;
pub mod lookup;
pub mod ports;

pub use booking::resolve_booking_url;
pub use domain::{BookingLink, FlightQuery, FlightResult, FlightsEnvelope, UpstreamQuery};
pub use lookup::{FlightLookup, FlightLookupService};
pub use ports::{CacheStore, FlightSource};
