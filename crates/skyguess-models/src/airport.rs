//! Airport reference data.
//!
//! A fixed table of major airports is loaded once; codes that are not in the
//! table resolve to a synthesized placeholder so a route can still be shown.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Sentinel some providers use in place of a missing airport code.
pub const UNKNOWN_CODE: &str = "Unknown";

/// City/country value used for synthesized entries.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Descriptive metadata for one airport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AirportInfo {
    /// IATA (or ICAO) code, upper case.
    pub code: String,
    /// Airport name.
    pub name: String,
    /// Served city.
    pub city: String,
    /// Country.
    pub country: String,
}

impl AirportInfo {
    /// Placeholder for a code missing from the reference table.
    pub fn placeholder(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: format!("{code} Airport"),
            city: UNKNOWN_PLACE.to_string(),
            country: UNKNOWN_PLACE.to_string(),
        }
    }

    /// Whether the country is actually known (not empty, not a placeholder).
    pub fn has_known_country(&self) -> bool {
        !self.country.is_empty() && self.country != UNKNOWN_PLACE
    }
}

// (code, name, city, country)
const REFERENCE_AIRPORTS: &[(&str, &str, &str, &str)] = &[
    // United States
    ("ATL", "Hartsfield-Jackson Atlanta International", "Atlanta", "United States"),
    ("LAX", "Los Angeles International", "Los Angeles", "United States"),
    ("ORD", "O'Hare International", "Chicago", "United States"),
    ("DFW", "Dallas/Fort Worth International", "Dallas", "United States"),
    ("DEN", "Denver International", "Denver", "United States"),
    ("JFK", "John F. Kennedy International", "New York", "United States"),
    ("SFO", "San Francisco International", "San Francisco", "United States"),
    ("SEA", "Seattle-Tacoma International", "Seattle", "United States"),
    ("LAS", "Harry Reid International", "Las Vegas", "United States"),
    ("MCO", "Orlando International", "Orlando", "United States"),
    ("EWR", "Newark Liberty International", "Newark", "United States"),
    ("MIA", "Miami International", "Miami", "United States"),
    ("PHX", "Phoenix Sky Harbor International", "Phoenix", "United States"),
    ("IAH", "George Bush Intercontinental", "Houston", "United States"),
    ("BOS", "Logan International", "Boston", "United States"),
    // Rest of the world
    ("LHR", "London Heathrow", "London", "United Kingdom"),
    ("CDG", "Charles de Gaulle", "Paris", "France"),
    ("FRA", "Frankfurt Airport", "Frankfurt", "Germany"),
    ("AMS", "Amsterdam Schiphol", "Amsterdam", "Netherlands"),
    ("MAD", "Adolfo Suárez Madrid-Barajas", "Madrid", "Spain"),
    ("BCN", "Barcelona-El Prat", "Barcelona", "Spain"),
    ("DXB", "Dubai International", "Dubai", "United Arab Emirates"),
    ("HND", "Tokyo Haneda", "Tokyo", "Japan"),
    ("NRT", "Narita International", "Tokyo", "Japan"),
    ("ICN", "Incheon International", "Seoul", "South Korea"),
    ("SIN", "Singapore Changi", "Singapore", "Singapore"),
    ("HKG", "Hong Kong International", "Hong Kong", "Hong Kong"),
    ("PEK", "Beijing Capital International", "Beijing", "China"),
    ("PVG", "Shanghai Pudong International", "Shanghai", "China"),
    ("YYZ", "Toronto Pearson International", "Toronto", "Canada"),
    ("YVR", "Vancouver International", "Vancouver", "Canada"),
    ("MEX", "Mexico City International", "Mexico City", "Mexico"),
    ("GRU", "São Paulo/Guarulhos International", "São Paulo", "Brazil"),
    ("SYD", "Sydney Kingsford Smith", "Sydney", "Australia"),
    ("MEL", "Melbourne Airport", "Melbourne", "Australia"),
];

static AIRPORTS: LazyLock<HashMap<&'static str, AirportInfo>> = LazyLock::new(|| {
    REFERENCE_AIRPORTS
        .iter()
        .map(|&(code, name, city, country)| {
            let info = AirportInfo {
                code: code.to_string(),
                name: name.to_string(),
                city: city.to_string(),
                country: country.to_string(),
            };
            (code, info)
        })
        .collect()
});

/// Resolve an airport code to its metadata.
///
/// Lookup is case-insensitive. Unknown codes produce
/// [`AirportInfo::placeholder`]. Only an empty code or the `"Unknown"`
/// sentinel yields `None`, which callers treat as "could not resolve".
///
/// # Examples
///
/// ```
/// use skyguess_models::lookup_airport;
///
/// let lhr = lookup_airport("lhr").unwrap();
/// assert_eq!(lhr.city, "London");
///
/// let zzz = lookup_airport("ZZZ").unwrap();
/// assert_eq!(zzz.name, "ZZZ Airport");
///
/// assert!(lookup_airport("Unknown").is_none());
/// ```
pub fn lookup_airport(code: &str) -> Option<AirportInfo> {
    let code = code.trim();
    if code.is_empty() || code == UNKNOWN_CODE {
        return None;
    }

    let code = code.to_uppercase();
    Some(
        AIRPORTS
            .get(code.as_str())
            .cloned()
            .unwrap_or_else(|| AirportInfo::placeholder(&code)),
    )
}
