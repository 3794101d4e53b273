//! Game clues derived from telemetry and resolved routes.
//!
//! * [`detect_flight_phase`] reads the vertical rate.
//! * [`determine_route_type`] and [`determine_duration`] classify a route.
//! * [`clues_for_route`] wires the two classifiers to a [`FlightRoute`].

use serde::{Deserialize, Serialize};

use crate::route::FlightRoute;

/// Vertical rate (m/s) beyond which an aircraft counts as climbing or descending.
pub const PHASE_RATE_THRESHOLD_MPS: f64 = 2.0;

/// Duration threshold for domestic routes, in hours.
pub const DOMESTIC_THRESHOLD_HOURS: i64 = 3;

/// Duration threshold for international routes, in hours.
pub const INTERNATIONAL_THRESHOLD_HOURS: i64 = 7;

/// Threshold label used when the duration is unknown.
pub const THRESHOLD_TBD: &str = "TBD";

// ---------------------------------------------------------------------------
// Flight phase
// ---------------------------------------------------------------------------

/// What the aircraft appears to be doing near the observer.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlightPhase {
    /// Descending: arriving at a nearby airport.
    Landing,
    /// Climbing: departing a nearby airport.
    Takeoff,
    /// Level flight or no vertical rate reported.
    Unknown,
}

/// Classify the flight phase from the vertical rate.
pub fn detect_flight_phase(vertical_rate_mps: Option<f64>) -> FlightPhase {
    match vertical_rate_mps {
        Some(rate) if rate < -PHASE_RATE_THRESHOLD_MPS => FlightPhase::Landing,
        Some(rate) if rate > PHASE_RATE_THRESHOLD_MPS => FlightPhase::Takeoff,
        _ => FlightPhase::Unknown,
    }
}

/// The instruction shown to the player for a given phase.
///
/// Takeoff and unknown share the same text.
pub fn game_prompt(phase: FlightPhase) -> &'static str {
    match phase {
        FlightPhase::Landing => "Guess where this plane is coming from",
        FlightPhase::Takeoff | FlightPhase::Unknown => "Guess where this plane is going",
    }
}

// ---------------------------------------------------------------------------
// Route / duration classification
// ---------------------------------------------------------------------------

/// Domestic or international.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RouteType {
    /// Origin and destination in the same country.
    Domestic,
    /// Origin and destination in different countries.
    International,
    /// Not enough information.
    Unknown,
}

/// Short or long haul relative to the route type's threshold.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlightDuration {
    /// Below the threshold.
    Short,
    /// At or above the threshold.
    Long,
    /// No positive duration available.
    Unknown,
}

/// Classify a route from its endpoint countries.
///
/// Either country empty ⇒ unknown; equal ⇒ domestic; otherwise international.
pub fn determine_route_type(origin_country: &str, destination_country: &str) -> RouteType {
    if origin_country.is_empty() || destination_country.is_empty() {
        RouteType::Unknown
    } else if origin_country == destination_country {
        RouteType::Domestic
    } else {
        RouteType::International
    }
}

/// Classify a duration against the 3 h (domestic) or 7 h (international)
/// threshold. Returns the classification and the threshold label.
///
/// # Examples
///
/// ```
/// use skyguess_models::{determine_duration, FlightDuration};
///
/// assert_eq!(determine_duration(179, true), (FlightDuration::Short, "3hr".to_string()));
/// assert_eq!(determine_duration(0, false), (FlightDuration::Unknown, "TBD".to_string()));
/// ```
pub fn determine_duration(duration_minutes: i64, is_domestic: bool) -> (FlightDuration, String) {
    if duration_minutes <= 0 {
        return (FlightDuration::Unknown, THRESHOLD_TBD.to_string());
    }

    let threshold_hours = if is_domestic {
        DOMESTIC_THRESHOLD_HOURS
    } else {
        INTERNATIONAL_THRESHOLD_HOURS
    };

    let duration = if duration_minutes < threshold_hours * 60 {
        FlightDuration::Short
    } else {
        FlightDuration::Long
    };

    (duration, format!("{threshold_hours}hr"))
}

// ---------------------------------------------------------------------------
// FlightClues
// ---------------------------------------------------------------------------

/// The clue set shown next to the game prompt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightClues {
    /// Domestic / international.
    pub route_type: RouteType,
    /// Short / long.
    pub duration: FlightDuration,
    /// Threshold label, e.g. `"3hr"`, or `"TBD"`.
    pub duration_threshold: String,
}

impl FlightClues {
    /// Nothing is known yet.
    pub fn unknown() -> Self {
        Self {
            route_type: RouteType::Unknown,
            duration: FlightDuration::Unknown,
            duration_threshold: THRESHOLD_TBD.to_string(),
        }
    }
}

impl Default for FlightClues {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Derive clues from a resolved route.
///
/// Placeholder countries count as unknown. Duration is only classified once
/// the route type is known, since the threshold depends on it.
pub fn clues_for_route(route: Option<&FlightRoute>) -> FlightClues {
    let Some((origin, destination)) = route.and_then(FlightRoute::endpoints) else {
        return FlightClues::unknown();
    };
    if !origin.has_known_country() || !destination.has_known_country() {
        return FlightClues::unknown();
    }

    let route_type = determine_route_type(&origin.country, &destination.country);
    let (duration, duration_threshold) = match route_type {
        RouteType::Unknown => (FlightDuration::Unknown, THRESHOLD_TBD.to_string()),
        known => determine_duration(
            route.and_then(|r| r.scheduled_duration_minutes).unwrap_or(0),
            known == RouteType::Domestic,
        ),
    };

    FlightClues {
        route_type,
        duration,
        duration_threshold,
    }
}

// ---------------------------------------------------------------------------
// GameRound
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs for one guessing round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameRound {
    /// Phase inferred from the vertical rate.
    pub phase: FlightPhase,
    /// Prompt text for that phase.
    pub prompt: String,
    /// Route-derived clues.
    pub clues: FlightClues,
    /// The resolved route, if any lookup was made.
    pub route: Option<FlightRoute>,
}

impl GameRound {
    /// Assemble a round from telemetry and an optional route.
    pub fn new(vertical_rate_mps: Option<f64>, route: Option<FlightRoute>) -> Self {
        let phase = detect_flight_phase(vertical_rate_mps);
        Self {
            phase,
            prompt: game_prompt(phase).to_string(),
            clues: clues_for_route(route.as_ref()),
            route,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::{lookup_airport, AirportInfo};
    use crate::route::{RouteEndpoints, RouteSource};

    #[test]
    fn phase_from_vertical_rate() {
        assert_eq!(detect_flight_phase(Some(-5.0)), FlightPhase::Landing);
        assert_eq!(detect_flight_phase(Some(6.5)), FlightPhase::Takeoff);
        assert_eq!(detect_flight_phase(Some(-2.0)), FlightPhase::Unknown);
        assert_eq!(detect_flight_phase(Some(2.0)), FlightPhase::Unknown);
        assert_eq!(detect_flight_phase(Some(0.0)), FlightPhase::Unknown);
        assert_eq!(detect_flight_phase(None), FlightPhase::Unknown);
    }

    #[test]
    fn landing_and_unknown_share_prompt() {
        assert_eq!(game_prompt(FlightPhase::Landing), "Guess where this plane is coming from");
        assert_eq!(game_prompt(FlightPhase::Takeoff), "Guess where this plane is going");
        assert_eq!(game_prompt(FlightPhase::Unknown), game_prompt(FlightPhase::Takeoff));
    }

    #[test]
    fn route_type_classification() {
        assert_eq!(determine_route_type("US", "US"), RouteType::Domestic);
        assert_eq!(determine_route_type("US", "GB"), RouteType::International);
        assert_eq!(determine_route_type("", "GB"), RouteType::Unknown);
        assert_eq!(determine_route_type("US", ""), RouteType::Unknown);
    }

    #[test]
    fn duration_classification() {
        assert_eq!(determine_duration(179, true), (FlightDuration::Short, "3hr".into()));
        assert_eq!(determine_duration(180, true), (FlightDuration::Long, "3hr".into()));
        assert_eq!(determine_duration(181, true), (FlightDuration::Long, "3hr".into()));
        assert_eq!(determine_duration(181, false), (FlightDuration::Short, "7hr".into()));
        assert_eq!(determine_duration(420, false), (FlightDuration::Long, "7hr".into()));
    }

    #[test]
    fn non_positive_duration_is_unknown() {
        for is_domestic in [true, false] {
            let unknown = (FlightDuration::Unknown, "TBD".to_string());
            assert_eq!(determine_duration(0, is_domestic), unknown);
            assert_eq!(determine_duration(-15, is_domestic), unknown);
        }
    }

    fn route(origin: &str, dest: &str, minutes: Option<i64>) -> FlightRoute {
        let endpoints = RouteEndpoints::new(
            lookup_airport(origin).unwrap(),
            lookup_airport(dest).unwrap(),
        )
        .with_duration(minutes);
        FlightRoute::found("UAL1", "abc123", endpoints, RouteSource::AviationStack)
    }

    #[test]
    fn clues_without_route_are_unknown() {
        assert_eq!(clues_for_route(None), FlightClues::unknown());
        let missing = FlightRoute::not_found("UAL1", "abc123");
        assert_eq!(clues_for_route(Some(&missing)), FlightClues::unknown());
    }

    #[test]
    fn clues_from_domestic_route() {
        let clues = clues_for_route(Some(&route("SFO", "LAX", Some(85))));
        assert_eq!(clues.route_type, RouteType::Domestic);
        assert_eq!(clues.duration, FlightDuration::Short);
        assert_eq!(clues.duration_threshold, "3hr");
    }

    #[test]
    fn clues_from_international_route_without_schedule() {
        let clues = clues_for_route(Some(&route("SFO", "LHR", None)));
        assert_eq!(clues.route_type, RouteType::International);
        assert_eq!(clues.duration, FlightDuration::Unknown);
        assert_eq!(clues.duration_threshold, "TBD");
    }

    #[test]
    fn placeholder_country_gives_unknown_clues() {
        let endpoints =
            RouteEndpoints::new(lookup_airport("SFO").unwrap(), AirportInfo::placeholder("ZZZ"));
        let r = FlightRoute::found("UAL1", "abc123", endpoints, RouteSource::Google);
        assert_eq!(clues_for_route(Some(&r)), FlightClues::unknown());
    }

    #[test]
    fn game_round_combines_phase_and_clues() {
        let round = GameRound::new(Some(-6.0), Some(route("JFK", "LHR", Some(415))));
        assert_eq!(round.phase, FlightPhase::Landing);
        assert_eq!(round.prompt, "Guess where this plane is coming from");
        assert_eq!(round.clues.route_type, RouteType::International);
        assert_eq!(round.clues.duration, FlightDuration::Short);

        let json = serde_json::to_value(&round).unwrap();
        assert_eq!(json["phase"], "landing");
        assert_eq!(json["clues"]["routeType"], "international");
        assert_eq!(json["clues"]["durationThreshold"], "7hr");
    }
}
