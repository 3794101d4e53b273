//! Aircraft state snapshots and the live-feed wire format.
//!
//! The live-state provider answers a bounding-box query with
//! `{ "time": <epoch secs>, "states": [[...], ...] | null }` where each state
//! is a positional array. [`AircraftSnapshot::from_state_vector`] decodes one
//! such array; [`relevant_aircraft`] drops everything the game should not
//! show.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::airline::is_commercial_flight;
use crate::error::ModelError;

// Positions inside a raw state vector.
const IDX_ICAO24: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_ORIGIN_COUNTRY: usize = 2;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_BARO_ALTITUDE: usize = 7;
const IDX_ON_GROUND: usize = 8;
const IDX_VELOCITY: usize = 9;
const IDX_VERTICAL_RATE: usize = 11;

// ---------------------------------------------------------------------------
// Icao24
// ---------------------------------------------------------------------------

/// 24-bit transponder address in lowercase hex, e.g. `a1b2c3`.
///
/// The only identity that stays stable across poll cycles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Icao24(String);

impl Icao24 {
    /// Create a new address from a string slice.
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Icao24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Icao24 {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// AircraftSnapshot
// ---------------------------------------------------------------------------

/// One observed aircraft at one point in time.
///
/// Snapshots are rebuilt from scratch every poll cycle and never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AircraftSnapshot {
    /// Transponder address.
    pub icao24: Icao24,
    /// Trimmed radio callsign, if broadcast.
    pub callsign: Option<String>,
    /// Country of registration as reported by the feed.
    pub origin_country: String,
    /// Latitude in degrees; `None` when position is unknown.
    pub latitude: Option<f64>,
    /// Longitude in degrees; `None` when position is unknown.
    pub longitude: Option<f64>,
    /// Barometric altitude in metres.
    pub altitude_meters: Option<f64>,
    /// Ground speed in m/s.
    pub ground_speed: Option<f64>,
    /// Vertical rate in m/s; negative while descending.
    pub vertical_rate_mps: Option<f64>,
    /// Whether the aircraft reports being on the ground.
    pub on_ground: bool,
}

impl AircraftSnapshot {
    /// Decode a positional state vector.
    ///
    /// Missing or mistyped fields become `None` (or `false` for the ground
    /// flag); nothing is validated here.
    pub fn from_state_vector(state: &[Value]) -> Self {
        let field = |idx: usize| state.get(idx).unwrap_or(&Value::Null);
        let text = |idx: usize| field(idx).as_str().map(str::to_string);

        Self {
            icao24: Icao24(text(IDX_ICAO24).unwrap_or_default()),
            callsign: text(IDX_CALLSIGN).map(|cs| cs.trim().to_string()),
            origin_country: text(IDX_ORIGIN_COUNTRY).unwrap_or_default(),
            latitude: field(IDX_LATITUDE).as_f64(),
            longitude: field(IDX_LONGITUDE).as_f64(),
            altitude_meters: field(IDX_BARO_ALTITUDE).as_f64(),
            ground_speed: field(IDX_VELOCITY).as_f64(),
            vertical_rate_mps: field(IDX_VERTICAL_RATE).as_f64(),
            on_ground: field(IDX_ON_GROUND).as_bool().unwrap_or(false),
        }
    }

    /// Whether this snapshot may be shown to the user: airborne, with a
    /// known position, flown under a commercial callsign.
    pub fn is_relevant(&self) -> bool {
        !self.on_ground
            && self.latitude.is_some()
            && self.longitude.is_some()
            && is_commercial_flight(self.callsign.as_deref())
    }
}

impl TryFrom<&Value> for AircraftSnapshot {
    type Error = ModelError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_array()
            .map(|state| Self::from_state_vector(state))
            .ok_or_else(|| ModelError::InvalidStateVector {
                reason: format!("expected a JSON array, got {value}"),
            })
    }
}

/// Keep only snapshots that pass [`AircraftSnapshot::is_relevant`].
///
/// Lazy: nothing is evaluated until the returned iterator is consumed.
pub fn relevant_aircraft<I>(snapshots: I) -> impl Iterator<Item = AircraftSnapshot>
where
    I: IntoIterator<Item = AircraftSnapshot>,
{
    snapshots.into_iter().filter(AircraftSnapshot::is_relevant)
}

// ---------------------------------------------------------------------------
// StatesResponse
// ---------------------------------------------------------------------------

/// Body returned by the live-state provider for a bounding-box query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StatesResponse {
    /// Provider timestamp, epoch seconds.
    #[serde(default)]
    pub time: i64,
    /// Raw state vectors; `null` means no aircraft this cycle.
    #[serde(default)]
    pub states: Option<Vec<Value>>,
}

impl StatesResponse {
    /// An empty response stamped with `time`.
    pub fn empty(time: i64) -> Self {
        Self { time, states: None }
    }

    /// Decode every state vector. A `null` state list yields no snapshots;
    /// records that are not arrays are logged and skipped.
    pub fn snapshots(&self) -> Vec<AircraftSnapshot> {
        self.states
            .iter()
            .flatten()
            .filter_map(|raw| {
                AircraftSnapshot::try_from(raw)
                    .map_err(|e| warn!(error = %e, "skipping malformed state vector"))
                    .ok()
            })
            .collect()
    }

    /// Decode and filter in one step.
    pub fn relevant_snapshots(&self) -> Vec<AircraftSnapshot> {
        relevant_aircraft(self.snapshots()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
