//! Plain-text rendering for terminal output.

use chrono::{DateTime, Utc};
use skyguess_models::{AircraftSnapshot, FlightRoute, GameRound};
use skyguess_sdk::AircraftSet;

fn opt(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0}{unit}"))
}

/// One line per aircraft.
pub fn aircraft_line(a: &AircraftSnapshot) -> String {
    format!(
        "{:<8} {:<8} {:>7} {:>7} {:>8}  {}",
        a.icao24.as_str(),
        a.callsign.as_deref().unwrap_or("-"),
        opt(a.altitude_meters, "m"),
        opt(a.ground_speed, "m/s"),
        a.vertical_rate_mps
            .map_or_else(|| "-".to_string(), |v| format!("{v:+.1}")),
        a.origin_country,
    )
}

/// Header plus one line per aircraft, stamped with the provider time.
pub fn aircraft_set(set: &AircraftSet) -> String {
    let stamp = set
        .provider_time
        .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0))
        .map_or_else(|| "--:--:--".to_string(), |t| t.format("%H:%M:%S").to_string());

    let mut out = format!("[{stamp}] {} aircraft\n", set.aircraft.len());
    for a in &set.aircraft {
        out.push_str("  ");
        out.push_str(&aircraft_line(a));
        out.push('\n');
    }
    out
}

/// `ORIGIN → DEST (source)` or the not-found text.
pub fn route(route: &FlightRoute) -> String {
    match route.endpoints() {
        Some((origin, destination)) => {
            let mut line = format!(
                "{} {} ({}, {}) → {} ({}, {})",
                route.callsign,
                origin.code,
                origin.city,
                origin.country,
                destination.code,
                destination.city,
                destination.country,
            );
            if let Some(source) = route.source {
                line.push_str(&format!(" via {source}"));
            }
            if let Some(minutes) = route.scheduled_duration_minutes {
                line.push_str(&format!(" [{}h{:02}]", minutes / 60, minutes % 60));
            }
            line
        }
        None => format!(
            "{}: {}",
            route.callsign,
            route.error.as_deref().unwrap_or("no route")
        ),
    }
}

/// Prompt, clues and route for one round.
pub fn game_round(round: &GameRound) -> String {
    let mut out = format!(
        "{}\n  phase:     {}\n  route:     {}\n  duration:  {} (threshold {})\n",
        round.prompt,
        round.phase,
        round.clues.route_type,
        round.clues.duration,
        round.clues.duration_threshold,
    );
    if let Some(r) = &round.route {
        out.push_str("  answer:    ");
        out.push_str(&route(r));
        out.push('\n');
    }
    out
}
