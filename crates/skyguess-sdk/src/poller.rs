//! Periodic refresh of the live aircraft set.
//!
//! [`AircraftPoller::start`] fixes the bounding box for a center and spawns
//! a background task that fetches the live states every poll interval,
//! keeps the relevant ones and publishes them as a whole new
//! [`AircraftSet`]. Readers go through a `watch` channel and therefore
//! always see a complete set.
//!
//! The task belongs to the returned [`PollerHandle`]: stopping or dropping
//! the handle cancels it, and a cancelled poller never publishes again. A
//! new center means a new handle.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use skyguess_models::{AircraftSnapshot, BoundingBox, GeoPoint};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::error::SdkError;
use crate::states::StateSource;

/// One published generation of relevant aircraft.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftSet {
    /// Airborne commercial aircraft with a known position.
    pub aircraft: Vec<AircraftSnapshot>,
    /// Provider timestamp of the response this set came from; `None`
    /// until the first successful cycle.
    pub provider_time: Option<i64>,
}

/// Factory for poll tasks sharing one state source and one set of timings.
#[derive(Clone)]
pub struct AircraftPoller {
    source: Arc<dyn StateSource>,
    interval: Duration,
    radius_km: f64,
    fetch_timeout: Duration,
}

impl AircraftPoller {
    /// Create a poller using the timings from `config`.
    pub fn new(source: Arc<dyn StateSource>, config: &FeedConfig) -> Self {
        Self {
            source,
            interval: config.poll_interval,
            radius_km: config.radius_km,
            fetch_timeout: config.fetch_timeout,
        }
    }

    /// Start polling around `center`. The first cycle runs immediately.
    pub fn start(&self, center: GeoPoint) -> PollerHandle {
        let bbox = BoundingBox::around(center, self.radius_km);
        let (tx, rx) = watch::channel(Arc::new(AircraftSet::default()));
        let token = CancellationToken::new();

        info!(
            lat = center.lat,
            lon = center.lon,
            radius_km = self.radius_km,
            interval_secs = self.interval.as_secs(),
            "aircraft poller starting"
        );

        let task = tokio::spawn(self.clone().run(bbox, tx, token.clone()));

        PollerHandle {
            center,
            bbox,
            rx,
            token,
            task: Some(task),
        }
    }

    /// Start polling only once both coordinates are known.
    pub fn start_when_ready(&self, lat: Option<f64>, lon: Option<f64>) -> Option<PollerHandle> {
        GeoPoint::from_parts(lat, lon).map(|center| self.start(center))
    }

    /// Run a single fetch → decode → filter cycle for `bbox`.
    pub async fn poll_once(&self, bbox: &BoundingBox) -> Result<AircraftSet, SdkError> {
        let response = tokio::time::timeout(self.fetch_timeout, self.source.fetch_states(bbox))
            .await
            .map_err(|_| SdkError::Timeout(self.fetch_timeout))??;

        Ok(AircraftSet {
            aircraft: response.relevant_snapshots(),
            provider_time: Some(response.time),
        })
    }

    async fn run(
        self,
        bbox: BoundingBox,
        tx: watch::Sender<Arc<AircraftSet>>,
        token: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                () = token.cancelled() => break,
                outcome = self.poll_once(&bbox) => outcome,
            };

            match outcome {
                Ok(set) => {
                    debug!(aircraft = set.aircraft.len(), "publishing aircraft set");
                    tx.send_replace(Arc::new(set));
                }
                // previous set stays published
                Err(e) => warn!(error = %e, "aircraft poll failed"),
            }
        }

        info!("aircraft poller stopped");
    }
}

/// Owner of a running poll task.
pub struct PollerHandle {
    center: GeoPoint,
    bbox: BoundingBox,
    rx: watch::Receiver<Arc<AircraftSet>>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Center this poller was started for.
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Box queried every cycle.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// The most recently published set.
    pub fn current(&self) -> Arc<AircraftSet> {
        self.rx.borrow().clone()
    }

    /// A receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AircraftSet>> {
        self.rx.clone()
    }

    /// Whether the background task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "aircraft poller task ended abnormally");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
