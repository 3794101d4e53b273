//! Skyguess command-line front end.
//!
//! ```text
//! skyguess track --lat 51.47 --lon -0.45      # follow traffic around a point
//! skyguess route UAL901                       # resolve a flight's route
//! skyguess clues UAL901 --vertical-rate -6.5  # one game round
//! skyguess normalize SWA456                   # radio callsign → flight number
//! skyguess bbox --lat 37.77 --lon -122.42     # print the query box
//! ```

mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use skyguess_models::{calculate_bounding_box, FlightNumber, GameRound, GeoPoint};
use skyguess_sdk::{AircraftPoller, FeedConfig, OpenSkyStatesClient, RouteResolver};
use tracing::info;

/// Fallback center when no position is given.
const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 37.7749,
    lon: -122.4194,
};

#[derive(Parser, Debug)]
#[command(name = "skyguess")]
#[command(about = "Guess where nearby planes are going")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll live traffic around a point and print every refresh.
    Track(TrackArgs),
    /// Resolve origin and destination for a callsign.
    Route(FlightArgs),
    /// Show the game prompt and clues for a flight.
    Clues {
        #[command(flatten)]
        flight: FlightArgs,
        /// Vertical rate in m/s (negative while descending).
        #[arg(long, allow_negative_numbers = true)]
        vertical_rate: Option<f64>,
    },
    /// Convert a radio callsign to its commercial flight number.
    Normalize {
        /// Radio callsign (e.g. UAL123).
        callsign: String,
    },
    /// Print the bounding box around a point.
    Bbox(CenterArgs),
}

#[derive(Args, Debug)]
pub struct CenterArgs {
    /// Center latitude; defaults to San Francisco.
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Center longitude; defaults to San Francisco.
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Box radius in km; overrides `SEARCH_RADIUS_KM`.
    #[arg(long)]
    pub radius_km: Option<f64>,
}

impl CenterArgs {
    fn center(&self) -> GeoPoint {
        GeoPoint::from_parts(self.lat, self.lon).unwrap_or(DEFAULT_CENTER)
    }
}

#[derive(Args, Debug)]
pub struct TrackArgs {
    #[command(flatten)]
    pub center: CenterArgs,

    /// Seconds between polls; overrides `POLL_INTERVAL_SECS`.
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Stop after this many published sets.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FlightArgs {
    /// Radio callsign (e.g. UAL901).
    pub callsign: String,

    /// Transponder address, echoed in the result.
    #[arg(long, default_value = "")]
    pub icao24: String,
}

/// Apply command-line overrides on top of the environment.
fn feed_config(radius_km: Option<f64>, interval_secs: Option<u64>) -> FeedConfig {
    let mut config = FeedConfig::from_env();
    if let Some(km) = radius_km.filter(|km| *km > 0.0) {
        config.radius_km = km;
    }
    if let Some(secs) = interval_secs.filter(|s| *s > 0) {
        config.poll_interval = Duration::from_secs(secs);
    }
    config
}

async fn track(args: TrackArgs, json: bool) -> anyhow::Result<()> {
    let config = feed_config(args.center.radius_km, args.interval_secs);
    let source = Arc::new(OpenSkyStatesClient::from_config(&config)?);
    let poller = AircraftPoller::new(source, &config);

    let center = args.center.center();
    let handle = poller.start(center);
    let mut rx = handle.subscribe();
    info!(lat = center.lat, lon = center.lon, "tracking; Ctrl-C to stop");

    let mut published = 0usize;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let set = rx.borrow_and_update().clone();
                if json {
                    println!("{}", serde_json::to_string(&*set)?);
                } else {
                    print!("{}", render::aircraft_set(&set));
                }
                published += 1;
                if args.count.is_some_and(|n| published >= n) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.stop().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => track(args, cli.json).await?,
        Commands::Route(flight) => {
            let resolver = RouteResolver::from_config(&feed_config(None, None))?;
            let route = resolver.resolve(&flight.callsign, &flight.icao24).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&route)?);
            } else {
                println!("{}", render::route(&route));
            }
        }
        Commands::Clues {
            flight,
            vertical_rate,
        } => {
            let resolver = RouteResolver::from_config(&feed_config(None, None))?;
            let route = resolver.resolve(&flight.callsign, &flight.icao24).await;
            let round = GameRound::new(vertical_rate, Some(route));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&round)?);
            } else {
                print!("{}", render::game_round(&round));
            }
        }
        Commands::Normalize { callsign } => {
            let number = FlightNumber::from_callsign(&callsign)
                .with_context(|| format!("cannot normalize {callsign:?}"))?;
            println!("{number}");
        }
        Commands::Bbox(args) => {
            let center = args.center();
            let radius = feed_config(args.radius_km, None).radius_km;
            let bbox = calculate_bounding_box(center.lat, center.lon, radius);
            if cli.json {
                println!("{}", serde_json::to_string(&bbox)?);
            } else {
                println!(
                    "lamin={:.4} lomin={:.4} lamax={:.4} lomax={:.4}",
                    bbox.lat_min, bbox.lon_min, bbox.lat_max, bbox.lon_max
                );
            }
        }
    }

    Ok(())
}
