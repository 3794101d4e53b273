#![deny(missing_docs)]

//! # Skyguess Models
//!
//! Core data types for tracking nearby aircraft and guessing where they are
//! headed.
//!
//! ## Data flow
//!
//! ```text
//! GeoPoint ──► BoundingBox ──► (live feed) ──► raw state vectors
//!                                                   │
//!                                    parse_state_vector / relevant_aircraft
//!                                                   ▼
//!                                           AircraftSnapshot
//!                                                   │ (user selects one)
//!                                                   ▼
//!                       callsign ──► FlightNumber ──► FlightRoute ──► FlightClues
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`geo`] | `GeoPoint`, `BoundingBox` and the radius → box calculation |
//! | [`aircraft`] | `AircraftSnapshot`, raw state-vector decoding, relevance filter |
//! | [`airline`] | Commercial carrier prefixes and callsign → flight-number normalization |
//! | [`airport`] | `AirportInfo` reference data and lookup |
//! | [`route`] | `FlightRoute` and the provider that answered |
//! | [`clues`] | Flight phase, game prompt, route-type and duration classification |
//!
//! Nothing in this crate performs I/O.

pub mod aircraft;
pub mod airline;
pub mod airport;
pub mod clues;
pub mod error;
pub mod geo;
pub mod route;

// Re-export all public types at crate root for convenience.
pub use aircraft::*;
pub use airline::*;
pub use airport::*;
pub use clues::*;
pub use error::*;
pub use geo::*;
pub use route::*;
