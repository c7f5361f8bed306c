//! Airline booking deep links.
//!
//! A fixed table maps airline names to URL templates. Names are matched exactly
//! (case-sensitive); anything else falls back to a Google Flights search.
//! Resolution is pure: no network, no cache.

use crate::domain::{BookingLink, format_route};
use url::form_urlencoded;

struct BookingSite {
    airline: &'static str,
    template: &'static str,
}

const BOOKING_SITES: &[BookingSite] = &[
    BookingSite {
        airline: "Delta",
        template: "https://www.delta.com/flight-search/book-a-flight?origin={origin}&dest={dest}",
    },
    BookingSite {
        airline: "JetBlue",
        template: "https://www.jetblue.com/booking/flights?from={origin}&to={dest}",
    },
    BookingSite {
        airline: "American",
        template: "https://www.aa.com/booking/find-flights?origin={origin}&dest={dest}",
    },
    BookingSite {
        airline: "United",
        template: "https://www.united.com/en/us/fsr/choose-flights?origin={origin}&dest={dest}",
    },
];

const DEFAULT_TEMPLATE: &str = "https://www.google.com/flights?q=flights+from+{origin}+to+{dest}";

fn template_for(airline: Option<&str>) -> &'static str {
    airline
        .and_then(|name| BOOKING_SITES.iter().find(|site| site.airline == name))
        .map(|site| site.template)
        .unwrap_or(DEFAULT_TEMPLATE)
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Resolves the booking link for `airline` between `origin` and `dest`.
/// Never fails. Missing origin or destination are substituted as empty strings.
pub fn resolve_booking_url(
    airline: Option<&str>,
    origin: Option<&str>,
    dest: Option<&str>,
) -> BookingLink {
    let origin = origin.unwrap_or_default();
    let dest = dest.unwrap_or_default();

    let url = template_for(airline)
        .replace("{origin}", &encode(origin))
        .replace("{dest}", &encode(dest));

    BookingLink {
        url,
        airline: airline.map(str::to_string),
        route: format_route(origin, dest),
    }
}
