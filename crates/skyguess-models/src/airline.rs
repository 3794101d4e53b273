//! Airline identifiers: commercial carrier detection and callsign →
//! flight-number normalization.
//!
//! Aircraft broadcast a radio callsign built from the operator's 3-letter
//! telephony prefix (e.g. `UAL123`). Schedule and search providers key
//! flights by the 2-character commercial code instead (`UA123`).
//! [`FlightNumber::from_callsign`] bridges the two through a small
//! translation table, falling back to the prefix's first two characters.
//!
//! The fallback is a heuristic: an unmapped prefix such as `XYZ` yields the
//! plausible-looking but not necessarily correct `XY`.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Radio prefixes of scheduled airlines considered "commercial".
pub const COMMERCIAL_PREFIXES: &[&str] = &[
    // United States
    "AAL", "UAL", "DAL", "SWA", "JBU", "ASA", "SKW", "FFT", "ENY", "PDT",
    // Europe
    "BAW", "EZY", "RYR", "AFR", "DLH", "KLM", "IBE", "AEE", "SAS", "FIN",
    // Asia-Pacific
    "ANA", "JAL", "CPA", "SIA", "QFA", "THA", "KAL", "AAR", "CSN", "CES",
    // Middle East
    "UAE", "ETD", "QTR", "SVA", "MEA",
    // Latin America
    "AZU", "TAM", "GOL", "LAN", "ARE", "AMX",
    // Canada
    "ACA", "WJA", "TSC",
    // Low-cost carriers
    "VOI", "WZZ", "NYX", "ROU", "BEE",
];

/// Known radio prefix → commercial code translations.
const RADIO_TO_COMMERCIAL: &[(&str, &str)] = &[
    ("UAL", "UA"),
    ("SWA", "WN"),
    ("AAL", "AA"),
    ("DAL", "DL"),
    ("FDX", "FX"),
    ("UPS", "5X"),
    ("BAW", "BA"),
    ("AFR", "AF"),
    ("DLH", "LH"),
    ("KLM", "KL"),
    ("ACA", "AC"),
    ("JBU", "B6"),
];

static CARRIER_CODES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| RADIO_TO_COMMERCIAL.iter().copied().collect());

/// Minimum callsign length accepted by the normalizer.
const MIN_CALLSIGN_LEN: usize = 4;

/// Returns true if the callsign starts with a known commercial prefix.
///
/// The comparison is made on the trimmed, upper-cased callsign. A missing
/// callsign is never commercial.
///
/// # Examples
///
/// ```
/// use skyguess_models::is_commercial_flight;
///
/// assert!(is_commercial_flight(Some("ual123 ")));
/// assert!(!is_commercial_flight(Some("N12345")));
/// assert!(!is_commercial_flight(None));
/// ```
pub fn is_commercial_flight(callsign: Option<&str>) -> bool {
    let Some(callsign) = callsign else {
        return false;
    };
    let cleaned = callsign.trim().to_uppercase();
    COMMERCIAL_PREFIXES
        .iter()
        .any(|prefix| cleaned.starts_with(prefix))
}

/// Translate a radio prefix to its commercial code.
///
/// Unmapped prefixes fall back to their first two characters.
pub fn commercial_carrier_code(radio_prefix: &str) -> &str {
    match CARRIER_CODES.get(radio_prefix) {
        Some(code) => code,
        None => radio_prefix.get(..2).unwrap_or(radio_prefix),
    }
}

// ---------------------------------------------------------------------------
// FlightNumber
// ---------------------------------------------------------------------------

/// A commercial flight number such as `UA123`.
///
/// # Examples
///
/// ```
/// use skyguess_models::FlightNumber;
///
/// let fn_ = FlightNumber::from_callsign("SWA456").unwrap();
/// assert_eq!(fn_.as_str(), "WN456");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightNumber(String);

impl FlightNumber {
    /// Normalize a radio callsign into a commercial flight number.
    ///
    /// The callsign is trimmed and upper-cased, then must consist of 2–3
    /// ASCII letters followed by at least one digit and nothing else.
    pub fn from_callsign(callsign: &str) -> Result<Self, ModelError> {
        let cleaned = callsign.trim().to_uppercase();
        let invalid = |reason: &str| ModelError::InvalidCallsign {
            value: callsign.to_string(),
            reason: reason.to_string(),
        };

        if cleaned.len() < MIN_CALLSIGN_LEN {
            return Err(invalid("must be at least 4 characters"));
        }

        let letters = cleaned
            .bytes()
            .take_while(u8::is_ascii_uppercase)
            .count();
        let (prefix, number) = cleaned.split_at(letters);

        if !(2..=3).contains(&prefix.len()) {
            return Err(invalid("expected a 2-3 letter carrier prefix"));
        }
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a numeric flight suffix"));
        }

        Ok(Self(format!("{}{number}", commercial_carrier_code(prefix))))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(cs: &str) -> Option<String> {
        FlightNumber::from_callsign(cs).ok().map(|f| f.to_string())
    }

    #[test]
    fn mapped_prefixes_translate() {
        assert_eq!(normalize("UAL123").as_deref(), Some("UA123"));
        assert_eq!(normalize("SWA456").as_deref(), Some("WN456"));
        assert_eq!(normalize("JBU7").as_deref(), Some("B67"));
        assert_eq!(normalize("UPS2901").as_deref(), Some("5X2901"));
    }

    #[test]
    fn unmapped_prefix_falls_back_to_two_letters() {
        assert_eq!(normalize("XYZ789").as_deref(), Some("XY789"));
        assert_eq!(normalize("EZY12").as_deref(), Some("EZ12"));
    }

    #[test]
    fn two_letter_prefix_passes_through() {
        assert_eq!(normalize("BA2490").as_deref(), Some("BA2490"));
    }

    #[test]
    fn input_is_trimmed_and_uppercased() {
        assert_eq!(normalize("  dal88 ").as_deref(), Some("DL88"));
    }

    #[test]
    fn too_short_fails() {
        assert!(normalize("UA1").is_none());
        assert!(normalize("").is_none());
        assert!(normalize("   ").is_none());
    }

    #[test]
    fn wrong_shape_fails() {
        // general aviation tail number: one letter then digits
        assert!(normalize("N12345").is_none());
        // trailing letter
        assert!(normalize("UAL12A").is_none());
        // four-letter prefix
        assert!(normalize("ABCD12").is_none());
        // no digits
        assert!(normalize("UALX").is_none());
    }

    #[test]
    fn failure_carries_original_value() {
        let err = FlightNumber::from_callsign("N1").unwrap_err();
        assert!(matches!(err, ModelError::InvalidCallsign { ref value, .. } if value == "N1"));
    }

    #[test]
    fn commercial_detection() {
        assert!(is_commercial_flight(Some("UAL123")));
        assert!(is_commercial_flight(Some(" baw12 ")));
        assert!(is_commercial_flight(Some("WZZ1AB")));
        assert!(!is_commercial_flight(Some("N12345")));
        assert!(!is_commercial_flight(Some("")));
        assert!(!is_commercial_flight(None));
    }

    #[test]
    fn carrier_code_lookup() {
        assert_eq!(commercial_carrier_code("KLM"), "KL");
        assert_eq!(commercial_carrier_code("QTR"), "QT");
        assert_eq!(commercial_carrier_code("A"), "A");
    }
}
