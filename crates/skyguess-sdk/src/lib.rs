//! # Skyguess SDK
//!
//! Network-facing half of skyguess: everything that talks to an external
//! data source.
//!
//! The SDK provides:
//!
//! * [`OpenSkyStatesClient`] — bounding-box queries against the live-state
//!   provider, behind the [`StateSource`] trait.
//! * [`AircraftPoller`] / [`PollerHandle`] — periodic refresh of the live
//!   aircraft set, cancelled when the handle is stopped or dropped.
//! * [`RouteResolver`] — ordered fallback over [`RouteProvider`]s, first
//!   success wins.
//! * [`FeedConfig`] — endpoints, credentials and timings shared by every
//!   front end.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use skyguess_sdk::{FeedConfig, RouteResolver};
//!
//! # async fn run() -> Result<(), skyguess_sdk::SdkError> {
//! let config = FeedConfig::from_env();
//! let resolver = RouteResolver::from_config(&config)?;
//! let route = resolver.resolve("UAL123", "a1b2c3").await;
//! println!("{:?} -> {:?}", route.origin, route.destination);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod poller;
pub mod providers;
pub mod resolver;
pub mod states;

pub use config::FeedConfig;
pub use error::SdkError;
pub use poller::{AircraftPoller, AircraftSet, PollerHandle};
pub use providers::{
    FlightDataProvider, RouteProvider, RouteRegistryProvider, SearchFallbackProvider,
};
pub use resolver::RouteResolver;
pub use states::{OpenSkyStatesClient, StateSource};
